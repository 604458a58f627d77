use std::path::PathBuf;

use thiserror::Error;

/// Errors raised when a demo is requested by name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DemoError {
    #[error("unknown demo: {0}")]
    UnknownDemo(String),
}

/// Errors raised while loading an [`AppConfig`](crate::config::AppConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
