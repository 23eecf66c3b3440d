//! Running counters kept by the error handler

use super::categorized::CategorizedError;
use super::recovery::RecoveryOutcome;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorStats {
    /// Total errors handled
    pub total_errors: u64,
    /// Errors by category
    pub errors_by_category: HashMap<String, u64>,
    /// Errors by severity
    pub errors_by_severity: HashMap<String, u64>,
    pub recoveries_attempted: u64,
    pub recoveries_succeeded: u64,
    pub recoveries_failed: u64,
    /// Notification sink calls that returned an error
    pub failed_notifications: u64,
    /// Last handled error timestamp
    pub last_error: Option<chrono::DateTime<chrono::Utc>>,
}

impl ErrorStats {
    pub(crate) fn record(&mut self, error: &CategorizedError) {
        self.total_errors += 1;
        *self
            .errors_by_category
            .entry(error.category().as_str().to_string())
            .or_insert(0) += 1;
        *self
            .errors_by_severity
            .entry(error.severity().as_str().to_string())
            .or_insert(0) += 1;
        self.last_error = Some(error.timestamp());
    }

    pub(crate) fn record_recovery(&mut self, outcome: &RecoveryOutcome) {
        match outcome {
            RecoveryOutcome::Recovered { .. } => {
                self.recoveries_attempted += 1;
                self.recoveries_succeeded += 1;
            }
            RecoveryOutcome::Failed { .. } => {
                self.recoveries_attempted += 1;
                self.recoveries_failed += 1;
            }
            RecoveryOutcome::NotRecoverable | RecoveryOutcome::NoStrategy => {}
        }
    }

    pub fn category_count(&self, category: super::ErrorCategory) -> u64 {
        self.errors_by_category
            .get(category.as_str())
            .copied()
            .unwrap_or(0)
    }
}
