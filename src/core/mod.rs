//! Admission decision engine and the domain types it reads.

pub mod category;
pub mod engine;
pub mod error;
pub mod lock;
pub mod state;
pub mod task;
pub mod throttle;
pub mod verdict;

pub use category::{Category, CategoryRegistry};
pub use engine::AdmissionEngine;
pub use error::{AppResult, ThrottleError};
pub use lock::{CategoryLock, CategoryLockState};
pub use state::{CategoryMember, RuntimeState, SlotKind, SlotSnapshot};
pub use task::{NodeId, Task, TaskId};
pub use throttle::{CategoryMembership, Role, ThrottleConfig, ThrottleMode};
pub use verdict::{Admission, CauseOfBlockage, PendingBuild};
