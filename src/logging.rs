// src/logging.rs

//! Stderr logging for `ganttdag`.
//!
//! The filter comes from, in order:
//! 1. `--log-level`, applied to every target;
//! 2. `GANTTDAG_LOG`, any `EnvFilter` directive string
//!    (`debug`, `ganttdag::dag=trace,warn`, ...);
//! 3. `info`.
//!
//! An unparsable `GANTTDAG_LOG` falls back to `info` and is reported once
//! the subscriber is up.

use anyhow::Result;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "GANTTDAG_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_value = std::env::var(LOG_ENV_VAR).ok();
    let (filter, rejected) = resolve_filter(cli_level, env_value.as_deref());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    if let Some(bad) = rejected {
        warn!(value = %bad, "ignoring unparsable {LOG_ENV_VAR}; using '{DEFAULT_DIRECTIVE}'");
    }
    Ok(())
}

/// The filter `init_logging` installs for a given flag and env value, plus
/// the env value if it had to be discarded.
pub fn resolve_filter(
    cli_level: Option<LogLevel>,
    env_value: Option<&str>,
) -> (EnvFilter, Option<String>) {
    if let Some(level) = cli_level {
        return (EnvFilter::new(level.directive()), None);
    }

    match env_value.map(str::trim).filter(|s| !s.is_empty()) {
        Some(spec) => match EnvFilter::try_new(spec) {
            Ok(filter) => (filter, None),
            Err(_) => (EnvFilter::new(DEFAULT_DIRECTIVE), Some(spec.to_string())),
        },
        None => (EnvFilter::new(DEFAULT_DIRECTIVE), None),
    }
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
