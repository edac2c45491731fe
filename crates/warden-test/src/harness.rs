//! Test harness helpers.

use tracing_subscriber::EnvFilter;

/// Install a test-friendly tracing subscriber.
///
/// Honors `RUST_LOG`, writes through the test capture, and is safe to call
/// from every test (only the first call installs).
pub fn init_test_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
