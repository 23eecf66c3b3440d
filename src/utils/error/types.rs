//! Error types for the resilience layer itself
//!
//! These are failures of the machinery (configuration, injected platform
//! capabilities, recovery actions), not the categorized application errors
//! the layer hands back to callers.

use thiserror::Error;

/// Result type alias for the resilience layer
pub type Result<T> = std::result::Result<T, ResilienceError>;

/// Main error type for the resilience layer
#[derive(Error, Debug)]
pub enum ResilienceError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Notification sink failures
    #[error("Notification error: {0}")]
    Notification(String),

    /// Navigation capability failures
    #[error("Navigation error: {0}")]
    Navigation(String),

    /// Recovery strategy failures
    #[error("Recovery error: {0}")]
    Recovery(String),

    /// Tracing subscriber installation failures
    #[error("Tracing error: {0}")]
    Tracing(String),
}

impl ResilienceError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn notification<S: Into<String>>(message: S) -> Self {
        Self::Notification(message.into())
    }

    pub fn navigation<S: Into<String>>(message: S) -> Self {
        Self::Navigation(message.into())
    }

    pub fn recovery<S: Into<String>>(message: S) -> Self {
        Self::Recovery(message.into())
    }

    pub fn tracing<S: Into<String>>(message: S) -> Self {
        Self::Tracing(message.into())
    }
}
