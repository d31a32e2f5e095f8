//! Tracing subscriber setup.
//!
//! The library itself only emits `tracing` events; embedding binaries
//! and tests call [`init`] once to get formatted output. `RUST_LOG`
//! overrides the default filter.

use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber with env-filter support. Safe to call more
/// than once; later calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("smartmarks=info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
