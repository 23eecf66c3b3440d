//! Logging utilities
//!
//! - `types`: core types (`LogLevel`, `LogEntry`, `LogContext`)
//! - `logger`: the ring-buffered `Logger`
//! - `utils`: tracing subscriber setup and formatting helpers

pub mod logger;
pub mod types;
pub mod utils;

pub use logger::Logger;
pub use types::{LogContext, LogEntry, LogLevel};
pub use utils::LoggingUtils;
