//! Diagnostic logging setup for the binary.

use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber.
///
/// Diagnostics go to stderr so stdout carries only rendered events. The
/// level comes from `RUST_LOG` and defaults to "info".
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
