//! Recovery strategies for recoverable categorized errors

mod registry;
mod strategies;
mod types;

pub use registry::RecoveryRegistry;
pub use strategies::{ConnectivityRecheckStrategy, FnStrategy, SessionRedirectStrategy};
pub use types::{RecoveryOutcome, RecoveryStrategy};
