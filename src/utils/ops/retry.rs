//! Retry with exponential backoff

use super::runner::OperationRunner;
use crate::config::RetryConfig;
use crate::utils::error::{CategorizedError, RawError};
use crate::utils::logging::LogContext;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

type RetryPredicate = Arc<dyn Fn(&CategorizedError, u32) -> bool + Send + Sync>;
type RetryCallback = Arc<dyn Fn(u32, &CategorizedError) + Send + Sync>;

/// Options for [`OperationRunner::retry_async`].
///
/// `max_retries` counts total attempts, first one included.
#[derive(Clone)]
pub struct RetryOptions {
    pub max_retries: u32,
    pub delay: Duration,
    pub backoff_multiplier: f64,
    pub max_delay: Option<Duration>,
    should_retry: Option<RetryPredicate>,
    on_retry: Option<RetryCallback>,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryOptions {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            delay: config.delay(),
            backoff_multiplier: config.backoff_multiplier,
            max_delay: config.max_delay(),
            should_retry: None,
            on_retry: None,
        }
    }
}

impl RetryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    pub fn max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = Some(max_delay);
        self
    }

    /// Replace the default predicate (retry Network and Database only).
    /// Receives the error and the number of the attempt that just failed.
    pub fn should_retry<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&CategorizedError, u32) -> bool + Send + Sync + 'static,
    {
        self.should_retry = Some(Arc::new(predicate));
        self
    }

    /// Called before each wait instead of the default log line
    pub fn on_retry<C>(mut self, callback: C) -> Self
    where
        C: Fn(u32, &CategorizedError) + Send + Sync + 'static,
    {
        self.on_retry = Some(Arc::new(callback));
        self
    }

    /// Attempts actually made; zero is treated as one
    pub fn attempts(&self) -> u32 {
        self.max_retries.max(1)
    }

    /// Wait after failed attempt `attempt` (1-based): `delay * multiplier^(attempt-1)`,
    /// capped by `max_delay`
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let secs = self.delay.as_secs_f64() * self.backoff_multiplier.powi(exponent);
        // NaN and negative products fall back to the base delay
        let computed = if secs >= 0.0 {
            Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
        } else {
            self.delay
        };
        match self.max_delay {
            Some(cap) => computed.min(cap),
            None => computed,
        }
    }

    fn permits_retry(&self, error: &CategorizedError, attempt: u32) -> bool {
        match &self.should_retry {
            Some(predicate) => predicate(error, attempt),
            None => error.category().is_transient(),
        }
    }
}

impl std::fmt::Debug for RetryOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryOptions")
            .field("max_retries", &self.max_retries)
            .field("delay", &self.delay)
            .field("backoff_multiplier", &self.backoff_multiplier)
            .field("max_delay", &self.max_delay)
            .field("should_retry", &self.should_retry.is_some())
            .field("on_retry", &self.on_retry.is_some())
            .finish()
    }
}

impl OperationRunner {
    /// Retry options built from this runner's configured defaults
    pub fn retry_options(&self) -> RetryOptions {
        RetryOptions::from(&self.retry_defaults)
    }

    /// Run `operation` until it succeeds, the predicate refuses, or attempts run out.
    ///
    /// Errors are categorized but not handled (no toast, no recovery); the
    /// last categorized error is returned on exhaustion.
    pub async fn retry_async<F, Fut, T, E>(
        &self,
        mut operation: F,
        options: RetryOptions,
    ) -> Result<T, CategorizedError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<RawError>,
    {
        let max_attempts = options.attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;

            let error = match operation().await {
                Ok(value) => return Ok(value),
                Err(e) => self.handler.categorize(e),
            };

            if attempt >= max_attempts || !options.permits_retry(&error, attempt) {
                debug!(
                    attempt,
                    category = %error.category(),
                    "giving up on operation"
                );
                return Err(error);
            }

            let delay = options.delay_for_attempt(attempt);
            match &options.on_retry {
                Some(callback) => callback(attempt, &error),
                None => self.handler.logger().warn(
                    &format!(
                        "Retrying operation (attempt {}/{}) in {:?}",
                        attempt + 1,
                        max_attempts,
                        delay
                    ),
                    Some(
                        LogContext::new()
                            .with_metadata("category", error.category().as_str())
                            .with_metadata("attempt", attempt),
                    ),
                    None,
                ),
            }

            sleep(delay).await;
        }
    }
}
