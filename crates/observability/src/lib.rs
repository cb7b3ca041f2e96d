//! `stockroom-observability` — process-wide tracing setup.

use tracing_subscriber::EnvFilter;

/// Initialize the JSON tracing subscriber.
///
/// The filter comes from `RUST_LOG`, falling back to `default_directive`.
/// Safe to call more than once; later calls are no-ops.
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_target(false)
        .try_init();
}
