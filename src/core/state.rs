//! Runtime state accessor consumed by the admission engine.
//!
//! The surrounding scheduler owns the queue, the worker inventory and the
//! task configuration store. The engine only reads through this trait, once
//! per decision, and never caches across calls.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{NodeId, Role, Task, TaskId, ThrottleConfig};

/// Kind of execution slot on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    /// Regular executor slot.
    Executor,
    /// Slot created for a one-off, ephemeral execution (e.g. the flyweight
    /// coordinating a multi-configuration job).
    OneOff,
}

/// Point-in-time view of one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSnapshot {
    /// Slot kind.
    pub kind: SlotKind,
    /// Task currently occupying the slot.
    pub occupant: Option<Task>,
}

impl SlotSnapshot {
    /// Whether the slot is running an instance of `task`.
    pub fn runs(&self, task: &TaskId) -> bool {
        self.occupant.as_ref().is_some_and(|t| t.id() == task)
    }
}

/// A task listed under a category, with the role it holds there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMember {
    /// Member task.
    pub task: TaskId,
    /// Role in the category.
    pub role: Option<Role>,
}

impl CategoryMember {
    /// Whether the member holds the writer role.
    pub fn is_writer(&self) -> bool {
        self.role == Some(Role::Writer)
    }
}

/// Read-only access to live cluster state.
///
/// Implementations return empty results rather than failing when data is
/// missing.
pub trait RuntimeState: Send + Sync {
    /// All worker nodes.
    fn nodes(&self) -> Vec<NodeId>;

    /// Slots of `node`, including one-off slots. Unknown nodes have none.
    fn slots(&self, node: &NodeId) -> Vec<SlotSnapshot>;

    /// Whether `task` is accepted by the queue but not yet bound to a slot.
    fn is_pending(&self, task: &TaskId) -> bool;

    /// Throttle configuration of `task`, if any.
    fn resolve_config(&self, task: &TaskId) -> Option<ThrottleConfig>;

    /// Every task configured as a member of `category`.
    fn members_of_category(&self, category: &str) -> Vec<CategoryMember>;

    /// Instances of `task` running on `node`.
    fn running_on_node(&self, task: &TaskId, node: &NodeId) -> u32 {
        let count = self.slots(node).iter().filter(|s| s.runs(task)).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Instances of `task` running anywhere in the cluster.
    fn running_cluster_wide(&self, task: &TaskId) -> u32 {
        self.nodes()
            .iter()
            .map(|node| self.running_on_node(task, node))
            .fold(0, u32::saturating_add)
    }
}

impl<T: RuntimeState + ?Sized> RuntimeState for Arc<T> {
    fn nodes(&self) -> Vec<NodeId> {
        (**self).nodes()
    }

    fn slots(&self, node: &NodeId) -> Vec<SlotSnapshot> {
        (**self).slots(node)
    }

    fn is_pending(&self, task: &TaskId) -> bool {
        (**self).is_pending(task)
    }

    fn resolve_config(&self, task: &TaskId) -> Option<ThrottleConfig> {
        (**self).resolve_config(task)
    }

    fn members_of_category(&self, category: &str) -> Vec<CategoryMember> {
        (**self).members_of_category(category)
    }

    fn running_on_node(&self, task: &TaskId, node: &NodeId) -> u32 {
        (**self).running_on_node(task, node)
    }

    fn running_cluster_wide(&self, task: &TaskId) -> u32 {
        (**self).running_cluster_wide(task)
    }
}
