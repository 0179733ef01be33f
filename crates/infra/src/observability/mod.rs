//! Tracing initialisation
//!
//! Installs a `tracing-subscriber` fmt subscriber filtered by `RUST_LOG`
//! (default `info`). Output goes to stderr so stdout stays free for records.

use std::str::FromStr;

use obscreen_domain::{ObscreenError, Result};
use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ObscreenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ObscreenError::config(format!("Unknown log format `{other}`"))),
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Call once per process.
///
/// # Errors
///
/// Returns `ObscreenError::Config` if a global subscriber is already set.
pub fn init_tracing(format: LogFormat) -> Result<()> {
    let builder = fmt().with_env_filter(env_filter()).with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Pretty => builder.with_target(false).try_init(),
        LogFormat::Json => builder.json().with_current_span(true).try_init(),
    };

    installed.map_err(|e| ObscreenError::config(format!("Failed to initialise tracing: {e}")))
}
