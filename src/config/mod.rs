//! Configuration for the resilience layer
//!
//! Loaded from YAML or built in code; every section has serde defaults so a
//! partial file is enough.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{MessageCatalog, ResilienceError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResilienceConfig {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub recovery: RecoveryConfig,
    /// Localized user-facing messages
    #[serde(default)]
    pub messages: MessageCatalog,
}

impl ResilienceConfig {
    /// Defaults for a development build
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            ..Self::default()
        }
    }

    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading resilience configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ResilienceError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_yaml_str(&content)
    }

    /// Parse and validate configuration from a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| ResilienceError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        self.logging
            .validate()
            .map_err(|e| ResilienceError::Config(format!("Logging config error: {}", e)))?;
        self.retry
            .validate()
            .map_err(|e| ResilienceError::Config(format!("Retry config error: {}", e)))?;
        self.recovery
            .validate()
            .map_err(|e| ResilienceError::Config(format!("Recovery config error: {}", e)))?;
        self.messages
            .validate()
            .map_err(|e| ResilienceError::Config(format!("Messages config error: {}", e)))?;
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            ResilienceError::Config(format!("Failed to serialize config to YAML: {}", e))
        })
    }
}
