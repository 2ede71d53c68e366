//! Tracing subscriber setup.
//!
//! Logs go to stdout so they show up inline in the CI job output. `RUST_LOG`
//! overrides the default `info` level.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// Newline-delimited JSON
    Json,
}

impl LogFormat {
    pub fn detect(explicit: &str) -> Self {
        match explicit {
            "json" | "JSON" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stdout).json())
            .try_init()
            .ok(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stdout))
            .try_init()
            .ok(),
    };
}
