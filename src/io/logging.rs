//! Tracing subscriber setup for the command-line tool

use tracing_subscriber::EnvFilter;

/// Build the event filter: `RUST_LOG` wins, otherwise `default_level`
///
/// An unparsable `default_level` falls back to `warn`.
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber writing to stderr
///
/// Returns `false` if a subscriber was already installed (for example by a
/// test harness); events then go to that subscriber.
pub fn init(default_level: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
