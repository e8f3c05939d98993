//! Throttle settings: category definitions plus per-job configuration.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{AppResult, Category, TaskId, ThrottleConfig, ThrottleError};

/// Environment variable naming the settings file read by [`ThrottleSettings::from_env`].
pub const CONFIG_PATH_ENV: &str = "THROTTLE_CONFIG";

/// Throttle configuration of one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobThrottle {
    /// Job the configuration belongs to.
    pub task: TaskId,
    /// Throttle settings of the job.
    #[serde(flatten)]
    pub throttle: ThrottleConfig,
}

/// Root throttle configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottleSettings {
    /// Global category definitions.
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Per-job throttle configuration.
    #[serde(default)]
    pub jobs: Vec<JobThrottle>,
}

impl ThrottleSettings {
    /// Validate category names and job identities.
    ///
    /// Memberships naming unknown categories are accepted; they are skipped
    /// when decisions are made.
    pub fn validate(&self) -> Result<(), ThrottleError> {
        let mut names = HashSet::new();
        for category in &self.categories {
            let name = category.name.trim();
            if name.is_empty() {
                return Err(ThrottleError::EmptyCategoryName);
            }
            if name != category.name {
                return Err(ThrottleError::InvalidConfig(format!(
                    "category `{}` has surrounding whitespace",
                    category.name
                )));
            }
            if !names.insert(name) {
                return Err(ThrottleError::DuplicateCategory(name.to_string()));
            }
        }

        let mut jobs = HashSet::new();
        for job in &self.jobs {
            if job.task.as_str().trim().is_empty() {
                return Err(ThrottleError::InvalidConfig("job with empty task id".into()));
            }
            if !jobs.insert(&job.task) {
                return Err(ThrottleError::InvalidConfig(format!(
                    "job `{}` configured twice",
                    job.task
                )));
            }
        }
        Ok(())
    }

    /// Parse settings from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, ThrottleError> {
        let settings: Self = serde_json::from_str(input)
            .map_err(|e| ThrottleError::InvalidConfig(format!("parse error: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a JSON settings file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ThrottleError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ThrottleError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&raw)
    }

    /// Load settings from the file named by `THROTTLE_CONFIG`, after applying
    /// a `.env` file if one is present. Without the variable, settings are empty.
    pub fn from_env() -> AppResult<Self> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(err.into());
            }
        }
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => {
                tracing::info!(path = %path, "loading throttle settings");
                Ok(Self::from_path(path)?)
            }
            Err(std::env::VarError::NotPresent) => {
                tracing::warn!("{CONFIG_PATH_ENV} not set; no throttling configured");
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Look up the configuration of `task`.
    pub fn job(&self, task: &TaskId) -> Option<&ThrottleConfig> {
        self.jobs
            .iter()
            .find(|job| &job.task == task)
            .map(|job| &job.throttle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Role, ThrottleMode};

    #[test]
    fn flattened_job_config_parses() {
        let settings = ThrottleSettings::from_json_str(
            r#"{
                "categories": [{"name": "db", "max_total": 1}],
                "jobs": [{
                    "task": "migrate",
                    "enabled": true,
                    "mode": "category",
                    "categories": [{"category": "db", "role": "writer"}]
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(settings.categories[0].max_per_node, 0);
        let job = settings.job(&"migrate".into()).unwrap();
        assert_eq!(job.mode, ThrottleMode::Category);
        assert_eq!(job.role_in("db"), Some(Role::Writer));
    }

    #[test]
    fn padded_category_name_is_rejected() {
        let settings = ThrottleSettings {
            categories: vec![Category::new(" db", 0, 0)],
            jobs: vec![],
        };
        assert!(matches!(
            settings.validate(),
            Err(ThrottleError::InvalidConfig(_))
        ));
    }
}
