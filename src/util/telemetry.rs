//! Telemetry helpers for structured logging.

/// Install a default env-filtered `tracing` subscriber unless one is already
/// set. Decision logs are emitted at `debug`, slot counting at `trace`.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(true)
        .try_init();
}
