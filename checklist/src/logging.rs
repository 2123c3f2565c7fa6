//! Diagnostic tracing for the checklist binary.
//!
//! Output goes to stderr so it never mixes with the rendered board or
//! rejection messages on stdout.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `warn` if unset, which still surfaces
/// storage degradation and clicks on unknown courses.
///
/// # Example
/// ```bash
/// RUST_LOG=checklist=debug checklist toggle MAT1
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
