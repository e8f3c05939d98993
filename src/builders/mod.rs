//! Builders to construct the admission engine from configuration.

pub mod engine_builder;

pub use engine_builder::{build_engine, build_registry};
