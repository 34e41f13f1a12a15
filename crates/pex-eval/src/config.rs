use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Log verbosity forwarded to the evaluation log collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Equivalent `tracing` level.
    pub fn to_tracing(self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Evaluation client settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Whether the field filter handler is registered.
    pub filter_evaluation: bool,
    /// Collected log level. `None` disables log collection.
    pub log_level: Option<LogLevel>,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            filter_evaluation: true,
            log_level: Some(LogLevel::Error),
        }
    }
}

impl EvaluationConfig {
    /// Parses a JSON configuration document; missing members keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Json { source })
    }
}
