//! Wiring for the error handler

use super::categorizer::ErrorCategorizer;
use super::handler::ErrorHandler;
use super::recovery::{ConnectivityRecheckStrategy, RecoveryStrategy, SessionRedirectStrategy};
use crate::config::ResilienceConfig;
use crate::utils::logging::Logger;
use crate::utils::sys::platform::{
    ConnectivityProbe, Navigator, NotificationSink, StaticConnectivity, TracingNavigator,
    TracingNotifier,
};
use std::sync::Arc;

/// Builds an [`ErrorHandler`] from configuration and host capabilities.
///
/// Missing capabilities fall back to headless implementations: a tracing
/// notifier, a tracing navigator and an always-online connectivity probe.
#[derive(Default)]
pub struct ErrorHandlerBuilder {
    config: ResilienceConfig,
    logger: Option<Arc<Logger>>,
    notifier: Option<Arc<dyn NotificationSink>>,
    navigator: Option<Arc<dyn Navigator>>,
    connectivity: Option<Arc<dyn ConnectivityProbe>>,
    strategies: Vec<Arc<dyn RecoveryStrategy>>,
}

impl ErrorHandlerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ResilienceConfig) -> Self {
        self.config = config;
        self
    }

    /// Share an existing logger instead of building one from the config
    pub fn with_logger(mut self, logger: Arc<Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn with_connectivity(mut self, connectivity: Arc<dyn ConnectivityProbe>) -> Self {
        self.connectivity = Some(connectivity);
        self
    }

    /// Register an additional strategy after the defaults
    pub fn add_strategy(mut self, strategy: Arc<dyn RecoveryStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    pub fn build(self) -> ErrorHandler {
        let config = self.config;
        let logger = self
            .logger
            .unwrap_or_else(|| Arc::new(Logger::new(&config.logging, config.environment)));
        let notifier = self
            .notifier
            .unwrap_or_else(|| Arc::new(TracingNotifier) as Arc<dyn NotificationSink>);

        let handler = ErrorHandler::new(
            logger,
            ErrorCategorizer::new(config.messages.clone()),
            Arc::clone(&notifier),
        );

        if config.recovery.default_strategies {
            let navigator = self
                .navigator
                .unwrap_or_else(|| Arc::new(TracingNavigator) as Arc<dyn Navigator>);
            let connectivity = self.connectivity.unwrap_or_else(|| {
                Arc::new(StaticConnectivity::online()) as Arc<dyn ConnectivityProbe>
            });

            handler.register_recovery_strategy(Arc::new(SessionRedirectStrategy::new(
                navigator,
                config.recovery.login_path.clone(),
            )));
            handler.register_recovery_strategy(Arc::new(ConnectivityRecheckStrategy::new(
                connectivity,
                notifier,
                config.recovery.network_recheck_delay(),
                config.messages.connection_restored.clone(),
            )));
        }

        for strategy in self.strategies {
            handler.register_recovery_strategy(strategy);
        }
        handler
    }
}
