//! Tracing subscriber setup shared by the binaries.

use tracing_subscriber::{EnvFilter, fmt as tfmt};

/// Install the global subscriber.
///
/// Filtering follows `RUST_LOG` (default `info`). Output goes to stderr so
/// stdout can carry the JSON document.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();
}
