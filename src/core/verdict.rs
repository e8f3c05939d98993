//! Admission verdicts and causes of blockage.

use std::fmt;

use serde::Serialize;

use super::TaskId;

/// Which pending build blocked the decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingBuild {
    /// The task being decided is itself already pending.
    Itself,
    /// Another member of a shared category is pending.
    Sibling(TaskId),
}

/// Reason a task may not be dispatched right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CauseOfBlockage {
    /// A build is accepted by the queue but not yet bound to a slot.
    BuildPending(PendingBuild),
    /// The per-node cap is reached; carries the observed count.
    NodeCapacityReached(u32),
    /// The cluster-wide cap is reached; carries the observed count.
    TotalCapacityReached(u32),
    /// A writer needs the category to itself.
    WriterLock,
    /// A reader is excluded by a running writer.
    ReaderLock,
}

impl CauseOfBlockage {
    /// Stable snake_case label for logs and API responses.
    pub const fn as_label(&self) -> &'static str {
        match self {
            Self::BuildPending(_) => "build_pending",
            Self::NodeCapacityReached(_) => "node_capacity_reached",
            Self::TotalCapacityReached(_) => "total_capacity_reached",
            Self::WriterLock => "writer_lock",
            Self::ReaderLock => "reader_lock",
        }
    }
}

impl fmt::Display for CauseOfBlockage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BuildPending(PendingBuild::Itself) => f.write_str("build already pending"),
            Self::BuildPending(PendingBuild::Sibling(_)) => f.write_str("sibling build pending"),
            Self::NodeCapacityReached(n) => write!(f, "node capacity reached ({n})"),
            Self::TotalCapacityReached(n) => write!(f, "total capacity reached ({n})"),
            Self::WriterLock => f.write_str("writer lock"),
            Self::ReaderLock => f.write_str("reader lock"),
        }
    }
}

/// Outcome of an admission query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Admission {
    /// Dispatch may proceed.
    Allow,
    /// Dispatch is blocked.
    Deny(CauseOfBlockage),
}

impl Admission {
    /// Whether dispatch may proceed.
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Cause of blockage, if denied.
    pub const fn cause(&self) -> Option<&CauseOfBlockage> {
        match self {
            Self::Allow => None,
            Self::Deny(cause) => Some(cause),
        }
    }
}

impl From<Option<CauseOfBlockage>> for Admission {
    fn from(cause: Option<CauseOfBlockage>) -> Self {
        cause.map_or(Self::Allow, Self::Deny)
    }
}
