//! Resilient async operation wrappers
//!
//! [`OperationRunner`] composes the error handler around caller-supplied
//! operations: guarded execution, retries, batches, debounce, throttle and
//! timeouts.

mod batch;
mod result;
mod retry;
mod runner;
mod timing;


pub use batch::SequentialOptions;
pub use result::AsyncResult;
pub use retry::RetryOptions;
pub use runner::OperationRunner;
pub use timing::{Debouncer, Throttler};
pub use tokio_util::sync::CancellationToken;
