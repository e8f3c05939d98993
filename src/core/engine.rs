//! Admission engine: decides whether a task may be dispatched.
//!
//! The scheduler calls [`AdmissionEngine::can_run_anywhere`] once per task per
//! pass and [`AdmissionEngine::can_assign_to_node`] for each candidate node.
//! Both are pure reads of a registry snapshot and the [`RuntimeState`];
//! counts are best-effort and races between concurrent calls are tolerated.
//!
//! Unresolvable input (no config, blank or unknown category names) adds no
//! constraint. It never denies and never fails.

use std::sync::Arc;

use super::category::CategorySnapshot;
use super::{
    Admission, Category, CategoryLock, CategoryMembership, CategoryRegistry, CauseOfBlockage,
    NodeId, PendingBuild, RuntimeState, Task, TaskId, ThrottleConfig, ThrottleMode,
};

/// Concurrency admission engine over a category registry and runtime state.
pub struct AdmissionEngine<S> {
    registry: Arc<CategoryRegistry>,
    state: S,
}

impl<S: RuntimeState> AdmissionEngine<S> {
    /// Create an engine reading `registry` and `state`.
    pub const fn new(registry: Arc<CategoryRegistry>, state: S) -> Self {
        Self { registry, state }
    }

    /// Category registry consulted by this engine.
    pub const fn registry(&self) -> &Arc<CategoryRegistry> {
        &self.registry
    }

    /// Runtime state consulted by this engine.
    pub const fn state(&self) -> &S {
        &self.state
    }

    /// Cluster-wide check, independent of placement.
    pub fn can_run_anywhere(&self, task: &Task) -> Admission {
        if task.is_sub_unit() {
            return Admission::Allow;
        }
        let verdict = self.self_pending(task).or_else(|| {
            let config = self.active_config(task)?;
            self.global_blockage(task, &config, &self.registry.snapshot())
        });
        log_verdict(task, None, verdict.as_ref());
        verdict.into()
    }

    /// Whether `task` may be bound to `node` right now. Includes the
    /// cluster-wide check.
    pub fn can_assign_to_node(&self, task: &Task, node: &NodeId) -> Admission {
        if task.is_sub_unit() {
            return Admission::Allow;
        }
        let Some(config) = self.active_config(task) else {
            return Admission::Allow;
        };

        let categories = self.registry.snapshot();
        let verdict = self
            .self_pending(task)
            .or_else(|| self.global_blockage(task, &config, &categories))
            .or_else(|| self.node_blockage(task, &config, node, &categories));
        log_verdict(task, Some(node), verdict.as_ref());
        verdict.into()
    }

    /// Nodes `task` may be placed on, in the order the state lists them.
    /// Empty when the cluster-wide check denies.
    pub fn dispatchable_nodes(&self, task: &Task) -> Vec<NodeId> {
        if task.is_sub_unit() {
            return self.state.nodes();
        }
        if let Some(cause) = self.self_pending(task) {
            log_verdict(task, None, Some(&cause));
            return Vec::new();
        }
        let Some(config) = self.active_config(task) else {
            return self.state.nodes();
        };

        let categories = self.registry.snapshot();
        if let Some(cause) = self.global_blockage(task, &config, &categories) {
            log_verdict(task, None, Some(&cause));
            return Vec::new();
        }
        self.state
            .nodes()
            .into_iter()
            .filter(|node| {
                let cause = self.node_blockage(task, &config, node, &categories);
                log_verdict(task, Some(node), cause.as_ref());
                cause.is_none()
            })
            .collect()
    }

    fn active_config(&self, task: &Task) -> Option<ThrottleConfig> {
        self.state
            .resolve_config(task.config_owner())
            .filter(|config| config.enabled)
    }

    fn self_pending(&self, task: &Task) -> Option<CauseOfBlockage> {
        self.state
            .is_pending(task.id())
            .then_some(CauseOfBlockage::BuildPending(PendingBuild::Itself))
    }

    fn global_blockage(
        &self,
        task: &Task,
        config: &ThrottleConfig,
        categories: &CategorySnapshot,
    ) -> Option<CauseOfBlockage> {
        match config.mode {
            ThrottleMode::Disabled => None,
            ThrottleMode::PerTask => {
                if config.max_total == 0 {
                    return None;
                }
                let total = self.state.running_cluster_wide(task.id());
                (total >= config.max_total).then_some(CauseOfBlockage::TotalCapacityReached(total))
            }
            ThrottleMode::Category => resolved(config, categories)
                .find_map(|(membership, category)| self.category_total_blockage(membership, category)),
        }
    }

    fn category_total_blockage(
        &self,
        membership: &CategoryMembership,
        category: &Category,
    ) -> Option<CauseOfBlockage> {
        let capped = category.max_total > 0;
        // Role-less membership on an uncapped category has nothing to enforce.
        if !capped && membership.role.is_none() {
            return None;
        }

        let mut lock = CategoryLock::default();
        for member in self.state.members_of_category(&category.name) {
            // Pending siblings only pre-empt under a cluster-wide cap.
            if capped {
                if let Some(cause) = self.pending_sibling(&member.task) {
                    tracing::debug!(category = %category.name, sibling = %member.task, "sibling build pending");
                    return Some(cause);
                }
            }
            let running = self.state.running_cluster_wide(&member.task);
            lock.observe(running, member.is_writer());
        }

        if capped && lock.running >= category.max_total {
            return Some(CauseOfBlockage::TotalCapacityReached(lock.running));
        }
        let cause = lock.evaluate(membership.role);
        if cause.is_some() {
            tracing::debug!(
                category = %category.name,
                state = ?lock.state(),
                role = ?membership.role,
                "category lock held"
            );
        }
        cause
    }

    fn node_blockage(
        &self,
        task: &Task,
        config: &ThrottleConfig,
        node: &NodeId,
        categories: &CategorySnapshot,
    ) -> Option<CauseOfBlockage> {
        match config.mode {
            ThrottleMode::Disabled => None,
            ThrottleMode::PerTask => {
                if config.max_per_node == 0 {
                    return None;
                }
                let running = self.state.running_on_node(task.id(), node);
                tracing::trace!(task = %task.id(), node = %node, running, "counted builds on node");
                (running >= config.max_per_node)
                    .then_some(CauseOfBlockage::NodeCapacityReached(running))
            }
            ThrottleMode::Category => resolved(config, categories)
                .find_map(|(_, category)| self.category_node_blockage(category, node)),
        }
    }

    fn category_node_blockage(&self, category: &Category, node: &NodeId) -> Option<CauseOfBlockage> {
        if category.max_per_node == 0 {
            return None;
        }

        let mut running: u32 = 0;
        for member in self.state.members_of_category(&category.name) {
            if let Some(cause) = self.pending_sibling(&member.task) {
                tracing::debug!(category = %category.name, sibling = %member.task, "sibling build pending");
                return Some(cause);
            }
            running = running.saturating_add(self.state.running_on_node(&member.task, node));
        }
        tracing::trace!(category = %category.name, node = %node, running, "counted category builds on node");

        (running >= category.max_per_node).then_some(CauseOfBlockage::NodeCapacityReached(running))
    }

    fn pending_sibling(&self, member: &TaskId) -> Option<CauseOfBlockage> {
        self.state
            .is_pending(member)
            .then(|| CauseOfBlockage::BuildPending(PendingBuild::Sibling(member.clone())))
    }
}

/// Memberships with a usable name whose category still exists, in configured order.
fn resolved<'a>(
    config: &'a ThrottleConfig,
    categories: &'a CategorySnapshot,
) -> impl Iterator<Item = (&'a CategoryMembership, &'a Category)> + 'a {
    config
        .categories
        .iter()
        .filter(|membership| membership.has_name())
        .filter_map(move |membership| {
            categories
                .get(&membership.category)
                .map(|category| (membership, category))
        })
}

fn log_verdict(task: &Task, node: Option<&NodeId>, cause: Option<&CauseOfBlockage>) {
    if let Some(cause) = cause {
        tracing::debug!(
            task = %task.id(),
            node = node.map(NodeId::as_str),
            reason = cause.as_label(),
            "dispatch blocked: {cause}"
        );
    }
}
