//! Logging configuration

use super::*;
use crate::utils::logging::LogLevel;
use serde::{Deserialize, Serialize};

/// Logger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum stored level; falls back to the environment default when unset
    #[serde(default)]
    pub min_level: Option<LogLevel>,
    /// Ring buffer capacity
    #[serde(default = "default_log_capacity")]
    pub capacity: usize,
    /// Capture a backtrace for ERROR and FATAL entries
    #[serde(default)]
    pub capture_backtraces: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            min_level: None,
            capacity: default_log_capacity(),
            capture_backtraces: false,
        }
    }
}

impl LoggingConfig {
    /// DEBUG in development, WARN in production, unless overridden
    pub fn effective_min_level(&self, environment: Environment) -> LogLevel {
        self.min_level.unwrap_or(if environment.is_development() {
            LogLevel::Debug
        } else {
            LogLevel::Warn
        })
    }
}
