//! Test fixtures and data factories
//!
//! Everything is wired with real in-memory capabilities, not mocks.

use std::sync::Arc;
use tutorhub_resilience::utils::sys::{MemoryNavigator, MemoryNotifier, StaticConnectivity};
use tutorhub_resilience::{
    ErrorDetails, ErrorHandler, Logger, OperationRunner, ResilienceConfig,
};

/// Handler, runner and the capabilities behind them
pub struct TestStack {
    pub logger: Arc<Logger>,
    pub notifier: Arc<MemoryNotifier>,
    pub navigator: Arc<MemoryNavigator>,
    pub connectivity: Arc<StaticConnectivity>,
    pub handler: Arc<ErrorHandler>,
    pub runner: OperationRunner,
}

impl TestStack {
    pub fn new(config: ResilienceConfig) -> Self {
        let logger = Arc::new(Logger::new(&config.logging, config.environment));
        let notifier = Arc::new(MemoryNotifier::new());
        let navigator = Arc::new(MemoryNavigator::new());
        let connectivity = Arc::new(StaticConnectivity::offline());

        let handler = Arc::new(
            ErrorHandler::builder()
                .with_config(config.clone())
                .with_logger(logger.clone())
                .with_notifier(notifier.clone())
                .with_navigator(navigator.clone())
                .with_connectivity(connectivity.clone())
                .build(),
        );
        let runner =
            OperationRunner::new(handler.clone()).with_retry_defaults(config.retry.clone());

        Self {
            logger,
            notifier,
            navigator,
            connectivity,
            handler,
            runner,
        }
    }

    /// Development stack: DEBUG threshold, console emission
    pub fn development() -> Self {
        Self::new(ResilienceConfig::development())
    }

    pub fn production() -> Self {
        Self::new(ResilienceConfig::default())
    }
}

/// Factory for raw errors as they arrive from the backend and the browser
pub struct RawErrorFactory;

impl RawErrorFactory {
    /// What a failed `fetch` rejects with
    pub fn failed_to_fetch() -> ErrorDetails {
        ErrorDetails::new("Failed to fetch").with_name("TypeError")
    }

    pub fn jwt_expired() -> ErrorDetails {
        ErrorDetails::new("JWT expired").with_status(401)
    }

    pub fn row_level_security() -> ErrorDetails {
        ErrorDetails::new("new row violates row-level security policy").with_status(403)
    }

    pub fn unique_violation() -> ErrorDetails {
        ErrorDetails::new("duplicate key value violates unique constraint \"bookings_pkey\"")
            .with_code("23505")
    }

    pub fn type_error() -> ErrorDetails {
        ErrorDetails::new("Cannot read properties of undefined (reading 'id')")
            .with_name("TypeError")
    }
}
