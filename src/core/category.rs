//! Named category limits and the registry holding them.
//!
//! The registry is copy-on-write: decision calls take an [`Arc`] snapshot and
//! never block reconfiguration, which swaps in a fresh table.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::ThrottleError;

/// A globally shared concurrency bucket. Caps of `0` mean unlimited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique name.
    pub name: String,
    /// Maximum concurrent member instances on one node.
    #[serde(default)]
    pub max_per_node: u32,
    /// Maximum concurrent member instances across the cluster.
    #[serde(default)]
    pub max_total: u32,
}

impl Category {
    /// Create a category definition.
    pub fn new(name: impl Into<String>, max_per_node: u32, max_total: u32) -> Self {
        Self {
            name: name.into(),
            max_per_node,
            max_total,
        }
    }
}

/// Immutable view of the registry used for one decision.
pub type CategorySnapshot = Arc<HashMap<String, Category>>;

/// Registry of category definitions, keyed by name.
#[derive(Debug, Default)]
pub struct CategoryRegistry {
    table: RwLock<CategorySnapshot>,
}

impl CategoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from definitions, rejecting blank and duplicate names.
    pub fn from_categories(
        categories: impl IntoIterator<Item = Category>,
    ) -> Result<Self, ThrottleError> {
        let registry = Self::new();
        registry.replace_all(categories)?;
        Ok(registry)
    }

    /// Current table. Later mutations do not affect the returned snapshot.
    pub fn snapshot(&self) -> CategorySnapshot {
        let table = self.table.read();
        Arc::clone(&*table)
    }

    /// Look up a category by name.
    pub fn get(&self, name: &str) -> Option<Category> {
        self.table.read().get(name).cloned()
    }

    /// Insert or replace a category definition.
    pub fn insert(&self, category: Category) -> Result<Option<Category>, ThrottleError> {
        if category.name.trim().is_empty() {
            return Err(ThrottleError::EmptyCategoryName);
        }
        let mut table = self.table.write();
        let mut next = (**table).clone();
        let previous = next.insert(category.name.clone(), category);
        *table = Arc::new(next);
        Ok(previous)
    }

    /// Remove a category. Memberships that still name it are skipped at
    /// decision time.
    pub fn remove(&self, name: &str) -> Option<Category> {
        let mut table = self.table.write();
        if !table.contains_key(name) {
            return None;
        }
        let mut next = (**table).clone();
        let removed = next.remove(name);
        *table = Arc::new(next);
        removed
    }

    /// Atomically replace every definition.
    pub fn replace_all(
        &self,
        categories: impl IntoIterator<Item = Category>,
    ) -> Result<(), ThrottleError> {
        let mut next = HashMap::new();
        for category in categories {
            if category.name.trim().is_empty() {
                return Err(ThrottleError::EmptyCategoryName);
            }
            if next.contains_key(&category.name) {
                return Err(ThrottleError::DuplicateCategory(category.name));
            }
            next.insert(category.name.clone(), category);
        }
        *self.table.write() = Arc::new(next);
        tracing::debug!("category registry replaced");
        Ok(())
    }

    /// Sorted category names, for operator listings.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.table.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    /// Whether the registry holds no categories.
    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }
}
