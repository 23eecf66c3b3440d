//! Built-in recovery strategies

use super::types::RecoveryStrategy;
use crate::utils::error::categorized::{CategorizedError, ErrorCategory};
use crate::utils::error::types::Result;
use crate::utils::sys::platform::{ConnectivityProbe, Navigator, NotificationSink};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Sends the user back to the login entry point when the session is gone.
///
/// Full-reload semantics are the navigator's responsibility.
pub struct SessionRedirectStrategy {
    navigator: Arc<dyn Navigator>,
    login_path: String,
}

impl SessionRedirectStrategy {
    pub fn new<S: Into<String>>(navigator: Arc<dyn Navigator>, login_path: S) -> Self {
        Self {
            navigator,
            login_path: login_path.into(),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }
}

#[async_trait::async_trait]
impl RecoveryStrategy for SessionRedirectStrategy {
    fn description(&self) -> &str {
        "redirect to login"
    }

    fn can_recover(&self, error: &CategorizedError) -> bool {
        error.category() == ErrorCategory::Authentication
    }

    async fn recover(&self, _error: &CategorizedError) -> Result<()> {
        debug!(path = %self.login_path, "session expired, redirecting");
        self.navigator.redirect(&self.login_path)
    }
}

/// Re-checks connectivity after a short delay and tells the user when the
/// connection is back.
///
/// The check runs on a spawned task, so `recover` returns immediately and the
/// handler is not held up by the delay. Nothing is retried here.
pub struct ConnectivityRecheckStrategy {
    probe: Arc<dyn ConnectivityProbe>,
    notifier: Arc<dyn NotificationSink>,
    delay: Duration,
    restored_message: String,
}

impl ConnectivityRecheckStrategy {
    pub fn new<S: Into<String>>(
        probe: Arc<dyn ConnectivityProbe>,
        notifier: Arc<dyn NotificationSink>,
        delay: Duration,
        restored_message: S,
    ) -> Self {
        Self {
            probe,
            notifier,
            delay,
            restored_message: restored_message.into(),
        }
    }
}

#[async_trait::async_trait]
impl RecoveryStrategy for ConnectivityRecheckStrategy {
    fn description(&self) -> &str {
        "connectivity recheck"
    }

    fn can_recover(&self, error: &CategorizedError) -> bool {
        error.category() == ErrorCategory::Network
    }

    async fn recover(&self, _error: &CategorizedError) -> Result<()> {
        let probe = Arc::clone(&self.probe);
        let notifier = Arc::clone(&self.notifier);
        let delay = self.delay;
        let message = self.restored_message.clone();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if !probe.is_online() {
                debug!("still offline after recheck");
                return;
            }
            if let Err(e) = notifier.info(&message) {
                warn!("Failed to notify restored connection: {}", e);
            }
        });
        Ok(())
    }
}

/// Strategy assembled from a predicate and an async action
pub struct FnStrategy<P, F> {
    description: String,
    predicate: P,
    action: F,
}

impl<P, F, Fut> FnStrategy<P, F>
where
    P: Fn(&CategorizedError) -> bool + Send + Sync,
    F: Fn(CategorizedError) -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    pub fn new<S: Into<String>>(description: S, predicate: P, action: F) -> Self {
        Self {
            description: description.into(),
            predicate,
            action,
        }
    }
}

#[async_trait::async_trait]
impl<P, F, Fut> RecoveryStrategy for FnStrategy<P, F>
where
    P: Fn(&CategorizedError) -> bool + Send + Sync,
    F: Fn(CategorizedError) -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    fn description(&self) -> &str {
        &self.description
    }

    fn can_recover(&self, error: &CategorizedError) -> bool {
        (self.predicate)(error)
    }

    async fn recover(&self, error: &CategorizedError) -> Result<()> {
        (self.action)(error.clone()).await
    }
}
