//! Uniform outcome of a guarded operation

use crate::utils::error::CategorizedError;

/// Either the operation's value or the categorized error, never both
#[derive(Debug, Clone)]
pub enum AsyncResult<T> {
    Success(T),
    Failure(CategorizedError),
}

impl<T> AsyncResult<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            AsyncResult::Success(data) => Some(data),
            AsyncResult::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&CategorizedError> {
        match self {
            AsyncResult::Success(_) => None,
            AsyncResult::Failure(error) => Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AsyncResult::Success(_))
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            AsyncResult::Success(data) => Some(data),
            AsyncResult::Failure(_) => None,
        }
    }

    pub fn into_result(self) -> Result<T, CategorizedError> {
        self.into()
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> AsyncResult<U> {
        match self {
            AsyncResult::Success(data) => AsyncResult::Success(f(data)),
            AsyncResult::Failure(error) => AsyncResult::Failure(error),
        }
    }
}

impl<T> From<Result<T, CategorizedError>> for AsyncResult<T> {
    fn from(result: Result<T, CategorizedError>) -> Self {
        match result {
            Ok(data) => AsyncResult::Success(data),
            Err(error) => AsyncResult::Failure(error),
        }
    }
}

impl<T> From<AsyncResult<T>> for Result<T, CategorizedError> {
    fn from(result: AsyncResult<T>) -> Self {
        match result {
            AsyncResult::Success(data) => Ok(data),
            AsyncResult::Failure(error) => Err(error),
        }
    }
}
