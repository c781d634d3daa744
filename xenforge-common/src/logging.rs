//! Tracing initialization for the harness side of a build.
//!
//! The build core never logs its failures; those travel as error values to
//! the caller. What tracing carries is the diagnostic trail of configuration
//! intake and pool queries, and the harness decides once at startup how that
//! trail is rendered.

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Diagnostic filter seeded from `level`.
///
/// A `RUST_LOG` environment variable overrides the configured level
/// wholesale, directives and all.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install a human-readable tracing subscriber at the given level.
///
/// Intended for interactive builds and test runs. At most one subscriber can
/// be installed per process; a second call fails.
pub fn init_logging(level: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(fmt::layer().with_target(true))
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}

/// Install a JSON-lines tracing subscriber at the given level.
///
/// Suitable for harness deployments that ship diagnostics to a log
/// aggregator.
pub fn init_logging_json(level: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(fmt::layer().json().with_target(true).with_ansi(false))
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}
