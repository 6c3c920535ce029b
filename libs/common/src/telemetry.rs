//! Tracing subscriber setup shared by the binaries

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber.
///
/// Honors `RUST_LOG`; falls back to `info` when unset or unparsable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
