//! Logging initialization.
//!
//! push-guard stands in for git, so it must stay quiet: only errors reach
//! standard error unless debugging is switched on.
//!
//! # Configuration
//!
//! - `PUSH_GUARD_DEBUG=1` - log every push-guard decision at debug level
//! - `PUSH_GUARD_LOG=<directives>` - full `EnvFilter` directives, e.g.
//!   `push_guard::security=debug`; takes precedence over `PUSH_GUARD_DEBUG`

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Enables debug logging when set to any non-empty value
pub const DEBUG_ENV: &str = "PUSH_GUARD_DEBUG";

/// Explicit filter directives
pub const FILTER_ENV: &str = "PUSH_GUARD_LOG";

/// Debug output for push-guard's own targets only; the library crate and
/// the `git` binary target. Dependencies stay at `error`.
const DEBUG_DIRECTIVES: &str = "error,push_guard=debug,git=debug";

/// Pick the filter directives from the two environment values
pub fn filter_directives(debug: Option<&str>, directives: Option<&str>) -> String {
    if let Some(directives) = directives.filter(|d| !d.is_empty()) {
        return directives.to_string();
    }

    match debug {
        Some(value) if !value.is_empty() => DEBUG_DIRECTIVES.to_string(),
        _ => "error".to_string(),
    }
}

/// Install the stderr subscriber
///
/// A subscriber that is already installed (tests, embedding) is left alone.
pub fn init_logging() {
    let debug = std::env::var(DEBUG_ENV).ok();
    let directives = std::env::var(FILTER_ENV).ok();
    let directives = filter_directives(debug.as_deref(), directives.as_deref());

    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("error"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}
