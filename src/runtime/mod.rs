//! Scheduler-facing API surface.

pub mod api;

pub use api::{evaluate, health, list_categories, AdmissionQuery, AdmissionResponse, CategoryListing, Health};
