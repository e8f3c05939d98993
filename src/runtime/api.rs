//! API-facing request/response models.

use serde::{Deserialize, Serialize};

use crate::core::{Admission, AdmissionEngine, CategoryRegistry, NodeId, RuntimeState, Task};

/// Admission query from the scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionQuery {
    /// Task to be dispatched.
    pub task: Task,
    /// Candidate node; `None` asks the cluster-wide question only.
    #[serde(default)]
    pub node: Option<NodeId>,
}

/// Admission answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionResponse {
    /// Whether dispatch may proceed.
    pub allowed: bool,
    /// Stable label of the cause of blockage.
    pub label: Option<String>,
    /// Human-readable cause of blockage.
    pub reason: Option<String>,
}

impl From<Admission> for AdmissionResponse {
    fn from(admission: Admission) -> Self {
        match admission {
            Admission::Allow => Self {
                allowed: true,
                label: None,
                reason: None,
            },
            Admission::Deny(cause) => Self {
                allowed: false,
                label: Some(cause.as_label().to_string()),
                reason: Some(cause.to_string()),
            },
        }
    }
}

/// Category data for listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryListing {
    /// Category name.
    pub name: String,
    /// Per-node cap (0 = unlimited).
    pub max_per_node: u32,
    /// Cluster-wide cap (0 = unlimited).
    pub max_total: u32,
}

/// Health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    /// Healthy flag.
    pub ok: bool,
}

/// Answer an admission query.
pub fn evaluate<S: RuntimeState>(engine: &AdmissionEngine<S>, query: &AdmissionQuery) -> AdmissionResponse {
    let admission = match &query.node {
        Some(node) => engine.can_assign_to_node(&query.task, node),
        None => engine.can_run_anywhere(&query.task),
    };
    admission.into()
}

/// List categories sorted by name.
pub fn list_categories(registry: &CategoryRegistry) -> Vec<CategoryListing> {
    let mut categories: Vec<CategoryListing> = registry
        .snapshot()
        .values()
        .map(|category| CategoryListing {
            name: category.name.clone(),
            max_per_node: category.max_per_node,
            max_total: category.max_total,
        })
        .collect();
    categories.sort_by(|a, b| a.name.cmp(&b.name));
    categories
}

/// Return a health payload.
pub const fn health() -> Health {
    Health { ok: true }
}
