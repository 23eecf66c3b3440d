//! Error handler: categorize, log, notify, recover
//!
//! The handler never fails towards its caller. Sink failures are counted and
//! logged through `tracing`, strategy failures are logged and abandoned, and
//! the categorized error is always returned.

use super::categorized::{CategorizedError, ErrorSeverity};
use super::categorizer::ErrorCategorizer;
use super::raw::RawError;
use super::recovery::{RecoveryOutcome, RecoveryRegistry, RecoveryStrategy};
use super::stats::ErrorStats;
use crate::utils::logging::{LogContext, Logger};
use crate::utils::sys::platform::{NotificationKind, NotificationSink};
use parking_lot::Mutex;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::warn;

/// Per-call handling switches.
///
/// Unset flags take the default of the entry point that receives them:
/// everything on for `handle_error`, no toast for `safe_async`.
#[derive(Debug, Clone, Default)]
pub struct HandleOptions {
    pub show_toast: Option<bool>,
    pub log_error: Option<bool>,
    pub attempt_recovery: Option<bool>,
    pub context: Option<LogContext>,
}

impl HandleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log only: no toast, no recovery
    pub fn quiet() -> Self {
        Self::new().show_toast(false).attempt_recovery(false)
    }

    pub fn show_toast(mut self, show: bool) -> Self {
        self.show_toast = Some(show);
        self
    }

    pub fn log_error(mut self, log: bool) -> Self {
        self.log_error = Some(log);
        self
    }

    pub fn attempt_recovery(mut self, attempt: bool) -> Self {
        self.attempt_recovery = Some(attempt);
        self
    }

    pub fn with_context(mut self, context: LogContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Shorthand for a context naming the calling component and action
    pub fn for_action<C: Into<String>, A: Into<String>>(self, component: C, action: A) -> Self {
        self.with_context(LogContext::component(component).with_action(action))
    }
}

pub struct ErrorHandler {
    logger: Arc<Logger>,
    categorizer: ErrorCategorizer,
    notifier: Arc<dyn NotificationSink>,
    recovery: RecoveryRegistry,
    stats: Mutex<ErrorStats>,
}

impl ErrorHandler {
    /// Handler with an empty recovery registry
    pub fn new(
        logger: Arc<Logger>,
        categorizer: ErrorCategorizer,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            logger,
            categorizer,
            notifier,
            recovery: RecoveryRegistry::new(),
            stats: Mutex::new(ErrorStats::default()),
        }
    }

    pub fn builder() -> super::builder::ErrorHandlerBuilder {
        super::builder::ErrorHandlerBuilder::new()
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    pub fn categorizer(&self) -> &ErrorCategorizer {
        &self.categorizer
    }

    pub fn notifier(&self) -> &Arc<dyn NotificationSink> {
        &self.notifier
    }

    pub fn recovery(&self) -> &RecoveryRegistry {
        &self.recovery
    }

    pub fn register_recovery_strategy(&self, strategy: Arc<dyn RecoveryStrategy>) {
        self.recovery.register(strategy);
    }

    pub fn categorize<E: Into<RawError>>(&self, error: E) -> CategorizedError {
        self.categorizer.categorize(error)
    }

    /// Categorize, log, notify and attempt recovery for a caught error.
    pub async fn handle_error<E: Into<RawError>>(
        &self,
        error: E,
        options: HandleOptions,
    ) -> CategorizedError {
        self.handle_with_defaults(error.into(), &options, true).await
    }

    /// `toast_default` applies when `options.show_toast` is unset
    pub(crate) async fn handle_with_defaults(
        &self,
        error: RawError,
        options: &HandleOptions,
        toast_default: bool,
    ) -> CategorizedError {
        let mut error = self.categorizer.categorize(error);
        if let Some(context) = &options.context {
            error = error.with_context(context.clone());
        }

        if options.log_error.unwrap_or(true) {
            self.log_categorized(&error);
        }
        if options.show_toast.unwrap_or(toast_default) {
            let kind = if error.severity() == ErrorSeverity::Low {
                NotificationKind::Warning
            } else {
                NotificationKind::Error
            };
            self.notify_user(kind, error.user_message());
        }

        self.stats.lock().record(&error);

        if options.attempt_recovery.unwrap_or(true) {
            let outcome = self.recovery.attempt(&error).await;
            self.log_recovery(&error, &outcome);
            self.stats.lock().record_recovery(&outcome);
        }

        error
    }

    /// Send a message to the notification sink, swallowing sink failures
    /// and panics.
    pub fn notify_user(&self, kind: NotificationKind, message: &str) {
        let outcome =
            panic::catch_unwind(AssertUnwindSafe(|| self.notifier.notify(kind, message)));
        let failure = match outcome {
            Ok(Ok(())) => return,
            Ok(Err(e)) => e.to_string(),
            Err(_) => "notification sink panicked".to_string(),
        };
        self.stats.lock().failed_notifications += 1;
        warn!("Failed to deliver {} notification: {}", kind.as_str(), failure);
    }

    pub fn error_stats(&self) -> ErrorStats {
        self.stats.lock().clone()
    }

    pub fn reset_stats(&self) {
        *self.stats.lock() = ErrorStats::default();
    }

    fn log_categorized(&self, error: &CategorizedError) {
        let cause = error
            .original()
            .map(|original| original as &(dyn std::error::Error + '_));
        self.logger.log(
            error.severity().log_level(),
            error.message(),
            Some(error.log_context()),
            cause,
        );
    }

    fn log_recovery(&self, error: &CategorizedError, outcome: &RecoveryOutcome) {
        let context = LogContext::new().with_metadata("category", error.category().as_str());
        match outcome {
            RecoveryOutcome::Recovered { strategy } => self.logger.debug(
                "Recovery strategy completed",
                Some(context.with_metadata("strategy", strategy.as_str())),
                None,
            ),
            RecoveryOutcome::Failed { strategy, reason } => self.logger.error(
                "Recovery strategy failed",
                Some(
                    context
                        .with_metadata("strategy", strategy.as_str())
                        .with_metadata("reason", reason.as_str()),
                ),
                None,
            ),
            RecoveryOutcome::NotRecoverable | RecoveryOutcome::NoStrategy => {}
        }
    }
}

impl std::fmt::Debug for ErrorHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorHandler")
            .field("logger", &self.logger)
            .field("categorizer", &self.categorizer)
            .field("recovery", &self.recovery)
            .finish_non_exhaustive()
    }
}
