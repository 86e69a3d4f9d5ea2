//! Log subscriber setup

use tracing_subscriber::EnvFilter;

use crate::config::{CliConfig, Verbosity};

/// Where log lines may go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Plain stderr
    Stderr,
    /// The terminal is owned by the full-screen UI; logging is off
    Interactive,
}

/// Filter used when `RUST_LOG` is not set
#[must_use]
pub fn default_filter(verbosity: Verbosity, target: LogTarget) -> EnvFilter {
    match target {
        LogTarget::Stderr => EnvFilter::new(verbosity.log_directive()),
        LogTarget::Interactive => EnvFilter::new("off"),
    }
}

/// Installs the global subscriber. Calling it twice is harmless.
pub fn init(config: &CliConfig, target: LogTarget) {
    let filter = match target {
        LogTarget::Stderr => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| default_filter(config.verbosity, target)),
        LogTarget::Interactive => default_filter(config.verbosity, target),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(config.use_color())
        .try_init();
}
