//! Recovery configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for the built-in recovery strategies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryConfig {
    /// Register the session-redirect and connectivity-recheck strategies
    #[serde(default = "default_true")]
    pub default_strategies: bool,
    /// Login entry point used after an authentication failure
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Wait before re-checking connectivity, in milliseconds
    #[serde(default = "default_network_recheck_delay_ms")]
    pub network_recheck_delay_ms: u64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            default_strategies: true,
            login_path: default_login_path(),
            network_recheck_delay_ms: default_network_recheck_delay_ms(),
        }
    }
}

impl RecoveryConfig {
    pub fn network_recheck_delay(&self) -> Duration {
        Duration::from_millis(self.network_recheck_delay_ms)
    }
}
