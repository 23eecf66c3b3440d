//! Utility modules for the resilience layer
//!
//! ## Module Organization
//!
//! - **error**: categorization, the error handler and recovery strategies
//! - **logging**: ring-buffered logger and tracing setup
//! - **ops**: resilient async operation wrappers
//! - **sys**: host platform capabilities

pub mod error;
pub mod logging;
pub mod ops;
pub mod sys;

pub use error::{CategorizedError, ErrorCategory, ErrorHandler, HandleOptions};
pub use logging::{LogEntry, LogLevel, Logger, LoggingUtils};
pub use ops::{AsyncResult, OperationRunner};
