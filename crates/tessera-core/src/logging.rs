//! Logging setup based on `tracing-subscriber`.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global fmt subscriber.
///
/// Panics if a global subscriber is already installed. Use [`try_init`] in
/// tests, where several cases may race to install one.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(DEFAULT_FILTER))
        .init();
}

/// Install the global fmt subscriber with a custom fallback filter, keeping
/// any subscriber that is already installed.
///
/// Returns `true` if this call installed it.
pub fn try_init_with_filter(default: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default))
        .try_init()
        .is_ok()
}

/// Test-friendly variant of [`init`]: output goes through the libtest
/// capture and a second call is a no-op.
pub fn try_init() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(DEFAULT_FILTER))
        .with_test_writer()
        .try_init()
        .is_ok()
}
