//! Task and node identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a schedulable task (a job definition).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Create an identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Identifier of a worker node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A unit of schedulable work as seen by the admission engine.
///
/// Sub-units are the individual cells of a multi-configuration job. They are
/// throttled through their parent, so the engine never evaluates them directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Task {
    /// A standalone job.
    Plain {
        /// Task identity.
        id: TaskId,
    },
    /// One cell of a multi-configuration job.
    SubUnit {
        /// Identity of the cell itself.
        id: TaskId,
        /// The multi-configuration job owning this cell.
        parent: TaskId,
    },
}

impl Task {
    /// Shorthand for a plain task.
    pub fn plain(id: impl Into<TaskId>) -> Self {
        Self::Plain { id: id.into() }
    }

    /// Shorthand for a sub-unit of `parent`.
    pub fn sub_unit(id: impl Into<TaskId>, parent: impl Into<TaskId>) -> Self {
        Self::SubUnit {
            id: id.into(),
            parent: parent.into(),
        }
    }

    /// Identity of this task.
    pub const fn id(&self) -> &TaskId {
        match self {
            Self::Plain { id } | Self::SubUnit { id, .. } => id,
        }
    }

    /// Whether this task is a cell of a multi-configuration job.
    pub const fn is_sub_unit(&self) -> bool {
        matches!(self, Self::SubUnit { .. })
    }

    /// The task whose throttle configuration governs this one.
    pub const fn config_owner(&self) -> &TaskId {
        match self {
            Self::Plain { id } => id,
            Self::SubUnit { parent, .. } => parent,
        }
    }
}

impl From<TaskId> for Task {
    fn from(id: TaskId) -> Self {
        Self::Plain { id }
    }
}
