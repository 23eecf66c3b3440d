//! Ordered strategy registry

use super::types::{RecoveryOutcome, RecoveryStrategy};
use crate::utils::error::categorized::CategorizedError;
use futures::FutureExt;
use parking_lot::RwLock;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Strategies in registration order; the first whose predicate matches wins.
#[derive(Default)]
pub struct RecoveryRegistry {
    strategies: RwLock<Vec<Arc<dyn RecoveryStrategy>>>,
}

impl RecoveryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a strategy. Duplicates are kept.
    pub fn register(&self, strategy: Arc<dyn RecoveryStrategy>) {
        self.strategies.write().push(strategy);
    }

    pub fn find(&self, error: &CategorizedError) -> Option<Arc<dyn RecoveryStrategy>> {
        self.strategies
            .read()
            .iter()
            .find(|strategy| strategy.can_recover(error))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.strategies.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.read().is_empty()
    }

    pub fn descriptions(&self) -> Vec<String> {
        self.strategies
            .read()
            .iter()
            .map(|strategy| strategy.description().to_string())
            .collect()
    }

    /// Run the first matching strategy for a recoverable error.
    ///
    /// A failing or panicking strategy is reported as [`RecoveryOutcome::Failed`];
    /// later strategies are never tried for the same error.
    pub async fn attempt(&self, error: &CategorizedError) -> RecoveryOutcome {
        if !error.is_recoverable() {
            return RecoveryOutcome::NotRecoverable;
        }
        // the lock is released before the strategy is awaited
        let Some(strategy) = self.find(error) else {
            return RecoveryOutcome::NoStrategy;
        };
        let name = strategy.description().to_string();

        match AssertUnwindSafe(strategy.recover(error)).catch_unwind().await {
            Ok(Ok(())) => RecoveryOutcome::Recovered { strategy: name },
            Ok(Err(e)) => RecoveryOutcome::Failed {
                strategy: name,
                reason: e.to_string(),
            },
            Err(_) => RecoveryOutcome::Failed {
                strategy: name,
                reason: "strategy panicked".to_string(),
            },
        }
    }
}

impl std::fmt::Debug for RecoveryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecoveryRegistry")
            .field("strategies", &self.descriptions())
            .finish()
    }
}
