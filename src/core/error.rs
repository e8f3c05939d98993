//! Error types for configuration and registry operations.
//!
//! Admission decisions themselves never fail; see [`crate::core::Admission`].

use thiserror::Error;

/// Errors produced while building or mutating throttle state.
#[derive(Debug, Error)]
pub enum ThrottleError {
    /// A category definition has an empty or blank name.
    #[error("empty category names are not allowed")]
    EmptyCategoryName,
    /// Two category definitions share a name.
    #[error("duplicate category: {0}")]
    DuplicateCategory(String),
    /// Configuration could not be parsed or is inconsistent.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// Configuration source could not be read.
    #[error("io error: {0}")]
    Io(String),
    /// A slot could not be occupied or released.
    #[error("slot error: {0}")]
    Slot(String),
}

impl ThrottleError {
    /// Short stable label for logs.
    pub const fn as_label(&self) -> &'static str {
        match self {
            Self::EmptyCategoryName => "empty_category_name",
            Self::DuplicateCategory(_) => "duplicate_category",
            Self::InvalidConfig(_) => "invalid_config",
            Self::Io(_) => "io",
            Self::Slot(_) => "slot",
        }
    }
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
