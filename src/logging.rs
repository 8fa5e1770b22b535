//! Tracing subscriber setup for binaries embedding the list core.
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! left to the application.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive (`debug`, `listgrid=trace`, ...).
pub const LOG_ENV: &str = "LISTGRID_LOG";

/// Install a fmt subscriber filtered by `LISTGRID_LOG`, defaulting to `info`.
pub fn init() {
    init_with_default("info");
}

/// Like [`init`] with a custom fallback directive. A second call is a no-op.
pub fn init_with_default(default_directive: &str) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
