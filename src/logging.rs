//! Tracing setup for the `resdoc` binary.

use std::env;

use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

/// Environment variable selecting the log format (`json` or `compact`).
pub const LOG_FORMAT_VAR: &str = "RESDOC_LOG_FORMAT";

/// Install the global subscriber.
///
/// Logs go to stderr so `--stdout` output stays clean. The filter comes from
/// `RUST_LOG` and defaults to `info`.
///
/// # Errors
/// Returns an error if a global subscriber is already installed.
pub fn init() -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let format = env::var(LOG_FORMAT_VAR).unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(env_filter);

    match format.as_str() {
        "json" => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        _ => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    }
}
