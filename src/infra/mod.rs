//! Infrastructure adapters for the runtime state accessor.

pub mod state;

pub use state::InMemoryClusterState;
