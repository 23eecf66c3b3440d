//! Recovery strategy contract

use crate::utils::error::categorized::CategorizedError;
use crate::utils::error::types::Result;

/// A side-effecting remediation for a class of recoverable errors
#[async_trait::async_trait]
pub trait RecoveryStrategy: Send + Sync {
    /// Label used in logs
    fn description(&self) -> &str;

    fn can_recover(&self, error: &CategorizedError) -> bool;

    async fn recover(&self, error: &CategorizedError) -> Result<()>;
}

/// What happened when the registry was consulted for an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryOutcome {
    /// The error is not recoverable; the registry was not walked
    NotRecoverable,
    /// No registered strategy matched
    NoStrategy,
    Recovered { strategy: String },
    /// The matching strategy failed; no other strategy is tried
    Failed { strategy: String, reason: String },
}

impl RecoveryOutcome {
    pub fn attempted(&self) -> bool {
        matches!(
            self,
            RecoveryOutcome::Recovered { .. } | RecoveryOutcome::Failed { .. }
        )
    }
}
