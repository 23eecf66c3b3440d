//! Guarded execution: handle, safe and validated operations

use super::result::AsyncResult;
use crate::config::RetryConfig;
use crate::utils::error::{CategorizedError, ErrorHandler, HandleOptions, RawError};
use crate::utils::logging::LogContext;
use crate::utils::sys::platform::NotificationKind;
use std::future::Future;
use std::sync::Arc;

/// Runs caller-supplied operations under the error handler.
///
/// Every failure meets the categorizer exactly once, at this boundary.
#[derive(Debug, Clone)]
pub struct OperationRunner {
    pub(super) handler: Arc<ErrorHandler>,
    pub(super) retry_defaults: RetryConfig,
}

impl OperationRunner {
    pub fn new(handler: Arc<ErrorHandler>) -> Self {
        Self {
            handler,
            retry_defaults: RetryConfig::default(),
        }
    }

    /// Defaults used by [`OperationRunner::retry_options`]
    pub fn with_retry_defaults(mut self, retry: RetryConfig) -> Self {
        self.retry_defaults = retry;
        self
    }

    pub fn handler(&self) -> &Arc<ErrorHandler> {
        &self.handler
    }

    /// Run `operation`; on failure hand the error to the handler and return `None`.
    pub async fn handle_async<F, Fut, T, E>(&self, operation: F, options: HandleOptions) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<RawError>,
    {
        self.try_handle_async(operation, options).await.ok()
    }

    /// Like [`OperationRunner::handle_async`] but the categorized error is
    /// returned to the caller after it has been handled.
    pub async fn try_handle_async<F, Fut, T, E>(
        &self,
        operation: F,
        options: HandleOptions,
    ) -> Result<T, CategorizedError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<RawError>,
    {
        match operation().await {
            Ok(value) => Ok(value),
            Err(e) => Err(self
                .handler
                .handle_with_defaults(e.into(), &options, true)
                .await),
        }
    }

    /// Run `operation` and report the outcome as an [`AsyncResult`].
    ///
    /// No notification is shown unless `options.show_toast` asks for one.
    pub async fn safe_async<F, Fut, T, E>(&self, operation: F, options: HandleOptions) -> AsyncResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<RawError>,
    {
        match operation().await {
            Ok(value) => AsyncResult::Success(value),
            Err(e) => AsyncResult::Failure(
                self.handler
                    .handle_with_defaults(e.into(), &options, false)
                    .await,
            ),
        }
    }

    /// Run `validate` first; a rejection skips the operation entirely.
    ///
    /// The rejection message is shown to the user verbatim, so validators
    /// must only return user-facing text.
    pub async fn validate_and_execute<V, F, Fut, T, E>(
        &self,
        validate: V,
        operation: F,
        options: HandleOptions,
    ) -> Option<T>
    where
        V: FnOnce() -> Result<(), String>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<RawError>,
    {
        if let Err(message) = validate() {
            let context = options
                .context
                .clone()
                .unwrap_or_default()
                .merge(LogContext::new().with_metadata("reason", message.as_str()));
            self.handler
                .logger()
                .warn("Validation failed", Some(context), None);
            if options.show_toast.unwrap_or(true) {
                self.handler.notify_user(NotificationKind::Error, &message);
            }
            return None;
        }

        self.handle_async(operation, options).await
    }
}
