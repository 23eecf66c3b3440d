//! Parallel and sequential batches of guarded operations

use super::result::AsyncResult;
use super::runner::OperationRunner;
use crate::utils::error::{HandleOptions, RawError};
use futures::future::join_all;
use std::future::Future;

/// Options for [`OperationRunner::sequential_async`]
#[derive(Debug, Clone, Default)]
pub struct SequentialOptions {
    /// Skip the remaining operations after the first failure
    pub stop_on_error: bool,
    pub handle: HandleOptions,
}

impl SequentialOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop_on_error(mut self, stop: bool) -> Self {
        self.stop_on_error = stop;
        self
    }

    pub fn with_handle_options(mut self, handle: HandleOptions) -> Self {
        self.handle = handle;
        self
    }
}

impl OperationRunner {
    /// Run all operations concurrently; results keep input order.
    ///
    /// Each operation is isolated through [`OperationRunner::safe_async`], so
    /// one failure never cancels the others.
    pub async fn parallel_async<I, F, Fut, T, E>(
        &self,
        operations: I,
        options: HandleOptions,
    ) -> Vec<AsyncResult<T>>
    where
        I: IntoIterator<Item = F>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<RawError>,
    {
        let pending = operations
            .into_iter()
            .map(|operation| self.safe_async(operation, options.clone()));
        join_all(pending).await
    }

    /// Run operations one after another; operation N+1 starts only after N settles.
    pub async fn sequential_async<I, F, Fut, T, E>(
        &self,
        operations: I,
        options: SequentialOptions,
    ) -> Vec<AsyncResult<T>>
    where
        I: IntoIterator<Item = F>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<RawError>,
    {
        let mut results = Vec::new();
        for operation in operations {
            let result = self.safe_async(operation, options.handle.clone()).await;
            let failed = !result.is_success();
            results.push(result);
            if failed && options.stop_on_error {
                break;
            }
        }
        results
    }
}
