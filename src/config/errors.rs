//! Configuration errors

use std::path::PathBuf;

use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Read { .. } => "DTAUS_CONFIG_READ_FAILED",
            ConfigError::Parse(_) => "DTAUS_CONFIG_PARSE_FAILED",
            ConfigError::Invalid(_) => "DTAUS_CONFIG_INVALID",
        }
    }
}
