//! # Throttle Concurrents
//!
//! Admission control for a shared build cluster.
//!
//! Before a queued task is bound to a worker slot, the scheduler asks this
//! crate whether starting it now would break a configured concurrency limit.
//! The crate only answers; it never queues, launches or tracks tasks itself.
//!
//! ## Limits
//!
//! - **Per-task**: a task caps its own instances per node and cluster-wide.
//! - **Category**: named buckets shared by many tasks, each with a per-node
//!   and a cluster-wide cap.
//! - **Reader/writer**: inside a category, readers run together, a writer
//!   needs the category to itself.
//!
//! A cap of `0` always means unlimited. Missing configuration and unknown
//! categories never block a decision.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use throttle_concurrents::core::{
//!     AdmissionEngine, Category, CategoryMembership, CategoryRegistry, CauseOfBlockage, Task,
//!     ThrottleConfig,
//! };
//! use throttle_concurrents::infra::InMemoryClusterState;
//!
//! let registry = Arc::new(CategoryRegistry::new());
//! registry.insert(Category::new("db", 0, 0)).unwrap();
//!
//! let state = Arc::new(InMemoryClusterState::new());
//! state.add_node("agent-1", 2);
//! state.set_config("migrate", ThrottleConfig::category([CategoryMembership::writer("db")]));
//! state.set_config("report", ThrottleConfig::category([CategoryMembership::reader("db")]));
//!
//! let engine = AdmissionEngine::new(registry, Arc::clone(&state));
//! state.start("agent-1", Task::plain("migrate")).unwrap();
//!
//! let verdict = engine.can_run_anywhere(&Task::plain("report"));
//! assert_eq!(verdict.cause(), Some(&CauseOfBlockage::ReaderLock));
//! ```
//!
//! For complete scenarios, see `tests/admission_engine_test.rs`.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Admission engine, category registry and domain types.
pub mod core;
/// Configuration models for categories and per-job throttling.
pub mod config;
/// Builders to construct the engine from configuration.
pub mod builders;
/// Infrastructure adapters for runtime state.
pub mod infra;
/// Scheduler-facing API surface.
pub mod runtime;
/// Shared utilities.
pub mod util;
