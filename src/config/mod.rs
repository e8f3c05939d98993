//! Configuration models for categories and per-job throttling.

pub mod settings;

pub use settings::{JobThrottle, ThrottleSettings, CONFIG_PATH_ENV};
