//! Configuration validation

use super::models::*;
use crate::utils::error::MessageCatalog;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.capacity == 0 {
            return Err("Log capacity must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_retries == 0 {
            return Err("max_retries must be at least 1".to_string());
        }
        if !self.backoff_multiplier.is_finite() || self.backoff_multiplier < 1.0 {
            return Err(format!(
                "backoff_multiplier must be a finite value >= 1.0, got {}",
                self.backoff_multiplier
            ));
        }
        if let Some(max_delay) = self.max_delay_ms {
            if max_delay < self.delay_ms {
                return Err(format!(
                    "max_delay_ms ({}) must not be smaller than delay_ms ({})",
                    max_delay, self.delay_ms
                ));
            }
        }
        Ok(())
    }
}

impl Validate for RecoveryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.login_path.trim().is_empty() {
            return Err("login_path cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Validate for MessageCatalog {
    fn validate(&self) -> Result<(), String> {
        for (name, message) in self.entries() {
            if message.trim().is_empty() {
                return Err(format!("User message '{}' cannot be empty", name));
            }
        }
        Ok(())
    }
}
