//! Per-task throttle configuration.

use serde::{Deserialize, Deserializer, Serialize};

/// How a task is throttled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThrottleMode {
    /// No throttling.
    #[default]
    Disabled,
    /// Limits come from the task's own `max_per_node` / `max_total`.
    #[serde(alias = "project")]
    PerTask,
    /// Limits come from the categories the task is a member of.
    Category,
}

/// Lock role a task holds inside a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// May run alongside other readers, never alongside a writer.
    Reader,
    /// Requires the category to be otherwise idle.
    Writer,
}

/// A task's participation in a named category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMembership {
    /// Name of the category in the registry.
    pub category: String,
    /// Lock role; `None` means only the numeric caps apply.
    #[serde(default, deserialize_with = "deserialize_role")]
    pub role: Option<Role>,
}

impl CategoryMembership {
    /// Membership without a lock role.
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            role: None,
        }
    }

    /// Membership holding the reader role.
    pub fn reader(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            role: Some(Role::Reader),
        }
    }

    /// Membership holding the writer role.
    pub fn writer(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            role: Some(Role::Writer),
        }
    }

    /// Whether the category name is usable at all.
    pub fn has_name(&self) -> bool {
        !self.category.trim().is_empty()
    }
}

// Older configurations spell the role-less membership as "normal".
fn deserialize_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("" | "normal") => Ok(None),
        Some("reader") => Ok(Some(Role::Reader)),
        Some("writer") => Ok(Some(Role::Writer)),
        Some(other) => Err(serde::de::Error::unknown_variant(
            other,
            &["reader", "writer", "normal"],
        )),
    }
}

/// Throttle configuration attached to a task definition.
///
/// With [`ThrottleMode::PerTask`] the memberships are ignored; with
/// [`ThrottleMode::Category`] the task's own caps are ignored. A cap of `0`
/// means unlimited.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThrottleConfig {
    /// Master switch.
    #[serde(default)]
    pub enabled: bool,
    /// Which family of limits applies.
    #[serde(default)]
    pub mode: ThrottleMode,
    /// Maximum concurrent instances on a single node.
    #[serde(default)]
    pub max_per_node: u32,
    /// Maximum concurrent instances across the cluster.
    #[serde(default)]
    pub max_total: u32,
    /// Ordered category memberships.
    #[serde(default)]
    pub categories: Vec<CategoryMembership>,
}

impl ThrottleConfig {
    /// Enabled per-task throttling with the given caps.
    pub const fn per_task(max_per_node: u32, max_total: u32) -> Self {
        Self {
            enabled: true,
            mode: ThrottleMode::PerTask,
            max_per_node,
            max_total,
            categories: Vec::new(),
        }
    }

    /// Enabled category throttling with the given memberships.
    pub fn category(categories: impl IntoIterator<Item = CategoryMembership>) -> Self {
        Self {
            enabled: true,
            mode: ThrottleMode::Category,
            max_per_node: 0,
            max_total: 0,
            categories: categories.into_iter().collect(),
        }
    }

    /// Whether this configuration constrains anything.
    pub fn is_active(&self) -> bool {
        self.enabled && self.mode != ThrottleMode::Disabled
    }

    /// Whether the task lists `category` among its memberships.
    pub fn is_member_of(&self, category: &str) -> bool {
        self.categories.iter().any(|m| m.category == category)
    }

    /// Role held in `category`. A writer entry wins over any other entry for
    /// the same name.
    pub fn role_in(&self, category: &str) -> Option<Role> {
        let mut role = None;
        for membership in self.categories.iter().filter(|m| m.category == category) {
            match membership.role {
                Some(Role::Writer) => return Some(Role::Writer),
                Some(Role::Reader) => role = Some(Role::Reader),
                None => {}
            }
        }
        role
    }
}
