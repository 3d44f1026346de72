//! Log setup for the `consulta` binary.
//!
//! Logs go to stderr so they never mix with rendered output. Any `-v` flag
//! picks the level; without one, `RUST_LOG` applies, falling back to `warn`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a `-v` count.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Filter directive for a `-v` count and the value of `RUST_LOG`, if any.
pub fn directive(verbosity: u8, rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim) {
        Some(env) if verbosity == 0 && !env.is_empty() => env.to_string(),
        _ => level_for(verbosity).to_string(),
    }
}

fn build_env_filter(verbosity: u8) -> EnvFilter {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    EnvFilter::try_new(directive(verbosity, rust_log.as_deref()))
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)))
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init(verbosity: u8) {
    let _ = tracing_subscriber::registry()
        .with(build_env_filter(verbosity))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
