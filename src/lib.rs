//! # tutorhub-resilience
//!
//! Client-side error handling and resilient async operations for the TutorHub
//! application.
//!
//! ## Features
//!
//! - **Categorization**: every failure is mapped onto an eight-way taxonomy
//!   with severity, recoverability and a localized, safe user message
//! - **Error Handler**: logs, notifies the user and dispatches recovery
//!   strategies for a caught error
//! - **Ring-buffered Logger**: bounded in-memory log history with JSON export
//! - **Async Wrappers**: guarded execution, retry with backoff, parallel and
//!   sequential batches, debounce, throttle and timeouts
//! - **Injected Capabilities**: notifications, navigation and connectivity
//!   are traits supplied by the host
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tutorhub_resilience::{HandleOptions, Resilience, ResilienceConfig, RetryOptions};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let resilience = Resilience::new(ResilienceConfig::development());
//!     let runner = resilience.runner();
//!
//!     let sessions = runner
//!         .retry_async(
//!             || async { reqwest::get("https://api.example.com/sessions").await?.text().await },
//!             RetryOptions::new().max_retries(3).delay(Duration::from_millis(500)),
//!         )
//!         .await;
//!
//!     if let Err(err) = sessions {
//!         // only the user message is ever shown
//!         println!("{}", err.user_message());
//!     }
//!
//!     let saved = runner
//!         .handle_async(
//!             || async { Err::<(), _>("database unavailable") },
//!             HandleOptions::new().for_action("BookingForm", "submit"),
//!         )
//!         .await;
//!     assert!(saved.is_none());
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod utils;

pub use config::{Environment, ResilienceConfig};
pub use utils::error::{
    CategorizedError, ErrorCategorizer, ErrorCategory, ErrorDetails, ErrorHandler,
    ErrorHandlerBuilder, ErrorSeverity, ErrorStats, HandleOptions, MessageCatalog, RawError,
    RecoveryStrategy, ResilienceError, Result,
};
pub use utils::logging::{LogContext, LogEntry, LogLevel, Logger};
pub use utils::ops::{
    AsyncResult, CancellationToken, Debouncer, OperationRunner, RetryOptions, SequentialOptions,
    Throttler,
};
pub use utils::sys::{ConnectivityProbe, Navigator, NotificationKind, NotificationSink};

use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// The wired error-handling stack for one application instance
#[derive(Debug, Clone)]
pub struct Resilience {
    config: Arc<ResilienceConfig>,
    handler: Arc<ErrorHandler>,
    runner: OperationRunner,
}

impl Resilience {
    /// Build with headless capabilities (tracing notifier and navigator)
    pub fn new(config: ResilienceConfig) -> Self {
        let handler = ErrorHandler::builder().with_config(config.clone()).build();
        Self::from_handler(config, handler)
    }

    /// Build around a handler wired by the caller
    pub fn from_handler(config: ResilienceConfig, handler: ErrorHandler) -> Self {
        info!(
            environment = ?config.environment,
            strategies = handler.recovery().len(),
            "Creating resilience stack"
        );
        let handler = Arc::new(handler);
        let runner =
            OperationRunner::new(Arc::clone(&handler)).with_retry_defaults(config.retry.clone());
        Self {
            config: Arc::new(config),
            handler,
            runner,
        }
    }

    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(ResilienceConfig::from_file(path).await?))
    }

    pub fn config(&self) -> &ResilienceConfig {
        &self.config
    }

    pub fn handler(&self) -> &Arc<ErrorHandler> {
        &self.handler
    }

    pub fn logger(&self) -> &Arc<Logger> {
        self.handler.logger()
    }

    pub fn runner(&self) -> &OperationRunner {
        &self.runner
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
