//! Logging bootstrap
//!
//! Logs go to stderr so JSON quote output on stdout stays machine-readable.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` overrides `level`.
///
/// Returns false when a subscriber was already installed.
pub fn init_logging(level: &str, json_format: bool) -> bool {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if json_format {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.is_ok()
}
