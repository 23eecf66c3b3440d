//! Error handling utilities
//!
//! Categorization of raw failures, the error handler that logs and notifies
//! them, and the recovery strategies it dispatches to.

pub mod builder;
pub mod categorized;
pub mod categorizer;
pub mod handler;
pub mod messages;
pub mod raw;
pub mod recovery;
pub mod stats;
pub mod types;


pub use builder::ErrorHandlerBuilder;
pub use categorized::{CategorizedError, ErrorCategory, ErrorSeverity};
pub use categorizer::ErrorCategorizer;
pub use handler::{ErrorHandler, HandleOptions};
pub use messages::MessageCatalog;
pub use raw::{ErrorDetails, RawError};
pub use recovery::{
    ConnectivityRecheckStrategy, FnStrategy, RecoveryOutcome, RecoveryRegistry, RecoveryStrategy,
    SessionRedirectStrategy,
};
pub use stats::ErrorStats;
pub use types::{ResilienceError, Result};
