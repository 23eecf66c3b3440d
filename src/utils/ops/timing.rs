//! Time-shaped wrappers: debounce, throttle and timeout
//!
//! Debounced and throttled calls run on spawned tasks and therefore need a
//! tokio runtime. Each call returns a [`CancellationToken`] that stops that
//! invocation whether it is still waiting or already running.

use super::runner::OperationRunner;
use crate::utils::error::{CategorizedError, ErrorDetails, ErrorHandler, HandleOptions, RawError};
use crate::utils::logging::LoggingUtils;
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, sleep, sleep_until};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Latest-call bookkeeping shared by debouncer and throttler
#[derive(Debug, Default)]
struct PendingSlot {
    generation: u64,
    pending: Option<CancellationToken>,
}

impl PendingSlot {
    /// Make `token` the pending call, cancelling the one it supersedes
    fn replace(&mut self, token: CancellationToken) -> u64 {
        if let Some(previous) = self.pending.replace(token) {
            previous.cancel();
        }
        self.generation += 1;
        self.generation
    }

    /// Claim the slot for `generation`; false when a newer call replaced it
    fn claim(&mut self, generation: u64) -> bool {
        if self.generation != generation {
            return false;
        }
        self.pending = None;
        true
    }

    fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
        self.generation += 1;
    }
}

/// Run `operation` unless `token` fires first, routing failures to the handler
async fn run_guarded<F, Fut, T, E>(
    handler: Arc<ErrorHandler>,
    options: HandleOptions,
    token: CancellationToken,
    operation: F,
) where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Into<RawError>,
{
    tokio::select! {
        _ = token.cancelled() => debug!("guarded call cancelled while running"),
        result = operation() => {
            if let Err(e) = result {
                handler.handle_with_defaults(e.into(), &options, true).await;
            }
        }
    }
}

/// Collapses bursts of calls: only the last call in a quiet window runs.
#[derive(Debug, Clone)]
pub struct Debouncer {
    handler: Arc<ErrorHandler>,
    delay: Duration,
    options: HandleOptions,
    slot: Arc<Mutex<PendingSlot>>,
}

impl Debouncer {
    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn with_options(mut self, options: HandleOptions) -> Self {
        self.options = options;
        self
    }

    /// Schedule `operation` after the delay, superseding any pending call.
    pub fn call<F, Fut, T, E>(&self, operation: F) -> CancellationToken
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Into<RawError> + Send + 'static,
    {
        let token = CancellationToken::new();
        let generation = self.slot.lock().replace(token.clone());

        let slot = Arc::clone(&self.slot);
        let handler = Arc::clone(&self.handler);
        let options = self.options.clone();
        let delay = self.delay;
        let task_token = token.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = task_token.cancelled() => return,
                _ = sleep(delay) => {}
            }
            if !slot.lock().claim(generation) {
                return;
            }
            run_guarded(handler, options, task_token, operation).await;
        });

        token
    }

    /// Drop the pending call, if any. A call already running is unaffected.
    pub fn cancel(&self) {
        self.slot.lock().cancel();
    }

    pub fn is_pending(&self) -> bool {
        self.slot.lock().pending.is_some()
    }
}

#[derive(Debug, Default)]
struct ThrottleState {
    window_end: Option<Instant>,
    trailing: PendingSlot,
}

/// Runs the first call of a window immediately and at most one trailing call
/// (the latest) when the window closes.
#[derive(Debug, Clone)]
pub struct Throttler {
    handler: Arc<ErrorHandler>,
    interval: Duration,
    options: HandleOptions,
    state: Arc<Mutex<ThrottleState>>,
}

impl Throttler {
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn with_options(mut self, options: HandleOptions) -> Self {
        self.options = options;
        self
    }

    pub fn call<F, Fut, T, E>(&self, operation: F) -> CancellationToken
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Into<RawError> + Send + 'static,
    {
        let token = CancellationToken::new();
        let handler = Arc::clone(&self.handler);
        let options = self.options.clone();
        let task_token = token.clone();

        let now = Instant::now();
        let trailing = {
            let mut state = self.state.lock();
            let window_end = state.window_end;
            match window_end {
                Some(end) if now < end => Some((end, state.trailing.replace(token.clone()))),
                _ => {
                    state.window_end = Some(now + self.interval);
                    None
                }
            }
        };

        match trailing {
            None => {
                tokio::spawn(run_guarded(handler, options, task_token, operation));
            }
            Some((window_end, generation)) => {
                let state = Arc::clone(&self.state);
                let interval = self.interval;
                tokio::spawn(async move {
                    tokio::select! {
                        _ = task_token.cancelled() => return,
                        _ = sleep_until(window_end) => {}
                    }
                    {
                        let mut state = state.lock();
                        if !state.trailing.claim(generation) {
                            return;
                        }
                        state.window_end = Some(Instant::now() + interval);
                    }
                    run_guarded(handler, options, task_token, operation).await;
                });
            }
        }

        token
    }

    /// Drop the pending trailing call, if any
    pub fn cancel(&self) {
        self.state.lock().trailing.cancel();
    }

    pub fn is_pending(&self) -> bool {
        self.state.lock().trailing.pending.is_some()
    }
}

impl OperationRunner {
    pub fn debounce(&self, delay: Duration) -> Debouncer {
        Debouncer {
            handler: Arc::clone(&self.handler),
            delay,
            options: HandleOptions::default(),
            slot: Arc::new(Mutex::new(PendingSlot::default())),
        }
    }

    pub fn throttle(&self, interval: Duration) -> Throttler {
        Throttler {
            handler: Arc::clone(&self.handler),
            interval,
            options: HandleOptions::default(),
            state: Arc::new(Mutex::new(ThrottleState::default())),
        }
    }

    /// Race `operation` against `timeout`. The losing operation is dropped.
    ///
    /// On elapse the error is Network/High; its user message is `message`
    /// when given, else the catalog's timeout text.
    pub async fn with_timeout<F, Fut, T, E>(
        &self,
        operation: F,
        timeout: Duration,
        message: Option<&str>,
    ) -> Result<T, CategorizedError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<RawError>,
    {
        match tokio::time::timeout(timeout, operation()).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(self.handler.categorize(e)),
            Err(_) => Err(self.timeout_error(timeout, message)),
        }
    }

    /// Same contract as [`OperationRunner::with_timeout`], but the operation runs
    /// on its own task and keeps running to completion if it loses the race.
    pub async fn with_timeout_detached<F, Fut, T, E>(
        &self,
        operation: F,
        timeout: Duration,
        message: Option<&str>,
    ) -> Result<T, CategorizedError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Into<RawError> + Send + 'static,
    {
        let task = tokio::spawn(operation());
        match tokio::time::timeout(timeout, task).await {
            Ok(Ok(Ok(value))) => Ok(value),
            Ok(Ok(Err(e))) => Err(self.handler.categorize(e)),
            Ok(Err(join_error)) => Err(self
                .handler
                .categorize(ErrorDetails::from_error(join_error).with_name("JoinError"))),
            Err(_) => Err(self.timeout_error(timeout, message)),
        }
    }

    fn timeout_error(&self, timeout: Duration, message: Option<&str>) -> CategorizedError {
        let err = self.handler.categorizer().timeout_error(format!(
            "Operation timed out after {}",
            LoggingUtils::format_duration(timeout)
        ));
        match message {
            Some(message) => err.with_user_message(message),
            None => err,
        }
    }
}
