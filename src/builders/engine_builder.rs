//! Build a category registry and admission engine from throttle settings.

use std::sync::Arc;

use crate::config::ThrottleSettings;
use crate::core::{AdmissionEngine, CategoryRegistry, RuntimeState, ThrottleError};

/// Build a registry holding every category defined in `cfg`.
pub fn build_registry(cfg: &ThrottleSettings) -> Result<CategoryRegistry, ThrottleError> {
    cfg.validate()?;
    CategoryRegistry::from_categories(cfg.categories.iter().cloned())
}

/// Build an engine over the categories in `cfg` and the state returned by
/// `state_factory`, which receives the validated settings.
pub fn build_engine<S, F>(
    cfg: &ThrottleSettings,
    state_factory: F,
) -> Result<AdmissionEngine<S>, ThrottleError>
where
    S: RuntimeState,
    F: FnOnce(&ThrottleSettings) -> Result<S, ThrottleError>,
{
    let registry = Arc::new(build_registry(cfg)?);
    let state = state_factory(cfg)?;
    tracing::info!(
        categories = registry.len(),
        jobs = cfg.jobs.len(),
        "admission engine built"
    );
    Ok(AdmissionEngine::new(registry, state))
}
