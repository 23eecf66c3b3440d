//! Configuration data models

#![allow(missing_docs)]

pub mod environment;
pub mod logging;
pub mod recovery;
pub mod retry;

pub use environment::*;
pub use logging::*;
pub use recovery::*;
pub use retry::*;

/// Default log ring buffer capacity
pub fn default_log_capacity() -> usize {
    1000
}

/// Default total retry attempts
pub fn default_max_retries() -> u32 {
    3
}

/// Default initial retry delay in milliseconds
pub fn default_retry_delay_ms() -> u64 {
    1000
}

pub fn default_backoff_multiplier() -> f64 {
    2.0
}

pub fn default_login_path() -> String {
    "/login".to_string()
}

/// Default connectivity re-check delay in milliseconds
pub fn default_network_recheck_delay_ms() -> u64 {
    2000
}

pub fn default_true() -> bool {
    true
}
