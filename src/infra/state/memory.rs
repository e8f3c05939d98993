//! In-memory runtime state for development and testing.
//!
//! Each table sits behind its own `parking_lot::RwLock`, so a driver thread can
//! start and finish builds while decision calls read concurrently.

use std::collections::{BTreeMap, HashSet};

use parking_lot::RwLock;

use crate::config::ThrottleSettings;
use crate::core::{
    CategoryMember, NodeId, RuntimeState, SlotKind, SlotSnapshot, Task, TaskId, ThrottleConfig,
    ThrottleError, ThrottleMode,
};

/// In-memory cluster: nodes with slots, the pending set and task configs.
#[derive(Debug, Default)]
pub struct InMemoryClusterState {
    nodes: RwLock<BTreeMap<NodeId, Vec<SlotSnapshot>>>,
    pending: RwLock<HashSet<TaskId>>,
    configs: RwLock<BTreeMap<TaskId, ThrottleConfig>>,
}

impl InMemoryClusterState {
    /// Create an empty cluster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cluster whose task configs come from `settings`.
    pub fn from_settings(settings: &ThrottleSettings) -> Self {
        let state = Self::new();
        state.load_jobs(settings);
        state
    }

    /// Register a node with `executors` regular slots. Returns `false` if the
    /// node already exists.
    pub fn add_node(&self, node: impl Into<NodeId>, executors: usize) -> bool {
        let node = node.into();
        let mut nodes = self.nodes.write();
        if nodes.contains_key(&node) {
            return false;
        }
        let slots = vec![
            SlotSnapshot {
                kind: SlotKind::Executor,
                occupant: None,
            };
            executors
        ];
        tracing::debug!(node = %node, executors, "node added");
        nodes.insert(node, slots);
        true
    }

    /// Remove a node and every instance running on it.
    pub fn remove_node(&self, node: &NodeId) -> bool {
        self.nodes.write().remove(node).is_some()
    }

    /// Bind `task` to a free executor slot on `node`. A pending entry for the
    /// task is cleared.
    pub fn start(&self, node: impl Into<NodeId>, task: Task) -> Result<(), ThrottleError> {
        let node = node.into();
        let mut nodes = self.nodes.write();
        let slots = nodes
            .get_mut(&node)
            .ok_or_else(|| ThrottleError::Slot(format!("unknown node `{node}`")))?;
        let slot = slots
            .iter_mut()
            .find(|s| s.kind == SlotKind::Executor && s.occupant.is_none())
            .ok_or_else(|| ThrottleError::Slot(format!("no free executor on `{node}`")))?;
        self.pending.write().remove(task.id());
        tracing::debug!(node = %node, task = %task.id(), "build started");
        slot.occupant = Some(task);
        Ok(())
    }

    /// Run `task` on a one-off slot created for it on `node`.
    pub fn start_one_off(&self, node: impl Into<NodeId>, task: Task) -> Result<(), ThrottleError> {
        let node = node.into();
        let mut nodes = self.nodes.write();
        let slots = nodes
            .get_mut(&node)
            .ok_or_else(|| ThrottleError::Slot(format!("unknown node `{node}`")))?;
        self.pending.write().remove(task.id());
        tracing::debug!(node = %node, task = %task.id(), "one-off build started");
        slots.push(SlotSnapshot {
            kind: SlotKind::OneOff,
            occupant: Some(task),
        });
        Ok(())
    }

    /// Release one running instance of `task` on `node`. One-off slots are
    /// discarded once released.
    pub fn finish(&self, node: &NodeId, task: &TaskId) -> Result<(), ThrottleError> {
        let mut nodes = self.nodes.write();
        let slots = nodes
            .get_mut(node)
            .ok_or_else(|| ThrottleError::Slot(format!("unknown node `{node}`")))?;
        let index = slots
            .iter()
            .position(|s| s.runs(task))
            .ok_or_else(|| ThrottleError::Slot(format!("`{task}` is not running on `{node}`")))?;
        let kind = slots[index].kind;
        match kind {
            SlotKind::Executor => slots[index].occupant = None,
            SlotKind::OneOff => {
                slots.remove(index);
            }
        }
        tracing::debug!(node = %node, task = %task, "build finished");
        Ok(())
    }

    /// Mark `task` as accepted by the queue but not yet dispatched.
    pub fn mark_pending(&self, task: impl Into<TaskId>) {
        self.pending.write().insert(task.into());
    }

    /// Clear the pending mark. Returns whether it was set.
    pub fn clear_pending(&self, task: &TaskId) -> bool {
        self.pending.write().remove(task)
    }

    /// Attach a throttle configuration to `task`, returning the previous one.
    pub fn set_config(
        &self,
        task: impl Into<TaskId>,
        config: ThrottleConfig,
    ) -> Option<ThrottleConfig> {
        self.configs.write().insert(task.into(), config)
    }

    /// Detach the throttle configuration of `task`.
    pub fn remove_config(&self, task: &TaskId) -> Option<ThrottleConfig> {
        self.configs.write().remove(task)
    }

    /// Load every job configuration from `settings`, replacing existing entries
    /// for the same tasks.
    pub fn load_jobs(&self, settings: &ThrottleSettings) {
        let mut configs = self.configs.write();
        for job in &settings.jobs {
            configs.insert(job.task.clone(), job.throttle.clone());
        }
    }
}

impl RuntimeState for InMemoryClusterState {
    fn nodes(&self) -> Vec<NodeId> {
        self.nodes.read().keys().cloned().collect()
    }

    fn slots(&self, node: &NodeId) -> Vec<SlotSnapshot> {
        self.nodes.read().get(node).cloned().unwrap_or_default()
    }

    fn is_pending(&self, task: &TaskId) -> bool {
        self.pending.read().contains(task)
    }

    fn resolve_config(&self, task: &TaskId) -> Option<ThrottleConfig> {
        self.configs.read().get(task).cloned()
    }

    fn members_of_category(&self, category: &str) -> Vec<CategoryMember> {
        self.configs
            .read()
            .iter()
            .filter(|(_, config)| {
                config.enabled && config.mode == ThrottleMode::Category && config.is_member_of(category)
            })
            .map(|(task, config)| CategoryMember {
                task: task.clone(),
                role: config.role_in(category),
            })
            .collect()
    }
}
