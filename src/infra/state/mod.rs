//! Runtime state backends.

pub mod memory;

pub use memory::InMemoryClusterState;
