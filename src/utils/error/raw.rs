//! Uncategorized error values as they arrive from operations
//!
//! Anything an operation can fail with is first lowered into a [`RawError`];
//! the categorizer only ever sees this shape.

use super::categorized::{CategorizedError, ErrorCategory};
use super::types::ResilienceError;
use std::error::Error as StdError;
use std::sync::Arc;

/// Failure value handed to the categorizer
#[derive(Debug, Clone)]
pub enum RawError {
    /// Already classified; categorization returns it unchanged
    Categorized(CategorizedError),
    /// Structured error with optional HTTP status, backend code or explicit tag
    Error(ErrorDetails),
    /// Bare value with no structure beyond its text
    Value(String),
}

impl RawError {
    pub fn message(&self) -> &str {
        match self {
            RawError::Categorized(err) => err.message(),
            RawError::Error(details) => &details.message,
            RawError::Value(text) => text,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RawError::Error(details) => details.status,
            _ => None,
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            RawError::Categorized(err) => err.code(),
            RawError::Error(details) => details.code.as_deref(),
            RawError::Value(_) => None,
        }
    }

    pub fn is_structured(&self) -> bool {
        !matches!(self, RawError::Value(_))
    }
}

impl std::fmt::Display for RawError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawError::Error(details) => match &details.name {
                Some(name) => write!(f, "{}: {}", name, details.message),
                None => f.write_str(&details.message),
            },
            other => f.write_str(other.message()),
        }
    }
}

impl StdError for RawError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            RawError::Categorized(err) => Some(err),
            RawError::Error(details) => details
                .source
                .as_deref()
                .map(|source| source as &(dyn StdError + 'static)),
            RawError::Value(_) => None,
        }
    }
}

/// Structured description of a failure.
///
/// `tag` is the explicit category carried by errors that were created for a
/// known condition; it always wins over status codes and message text.
#[derive(Debug, Clone, Default)]
pub struct ErrorDetails {
    pub name: Option<String>,
    pub message: String,
    pub status: Option<u16>,
    pub code: Option<String>,
    pub tag: Option<ErrorCategory>,
    pub source: Option<Arc<dyn StdError + Send + Sync>>,
}

impl ErrorDetails {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Details describing `error`, keeping it as the source
    pub fn from_error<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            message: error.to_string(),
            source: Some(Arc::new(error)),
            ..Self::default()
        }
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_code<S: Into<String>>(mut self, code: S) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn tagged(mut self, category: ErrorCategory) -> Self {
        self.tag = Some(category);
        self
    }
}

impl From<CategorizedError> for RawError {
    fn from(err: CategorizedError) -> Self {
        RawError::Categorized(err)
    }
}

impl From<ErrorDetails> for RawError {
    fn from(details: ErrorDetails) -> Self {
        RawError::Error(details)
    }
}

impl From<String> for RawError {
    fn from(text: String) -> Self {
        RawError::Value(text)
    }
}

impl From<&str> for RawError {
    fn from(text: &str) -> Self {
        RawError::Value(text.to_string())
    }
}

impl From<std::io::Error> for RawError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;

        let connection_failure = matches!(
            err.kind(),
            ErrorKind::ConnectionRefused
                | ErrorKind::ConnectionReset
                | ErrorKind::ConnectionAborted
                | ErrorKind::NotConnected
                | ErrorKind::BrokenPipe
                | ErrorKind::TimedOut
        );
        let mut details = ErrorDetails::from_error(err).with_name("IoError");
        if connection_failure {
            details = details.tagged(ErrorCategory::Network);
        }
        RawError::Error(details)
    }
}

impl From<serde_json::Error> for RawError {
    fn from(err: serde_json::Error) -> Self {
        RawError::Error(ErrorDetails::from_error(err).with_name("SerdeJsonError"))
    }
}

impl From<reqwest::Error> for RawError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        let unreachable = err.is_connect() || err.is_timeout();

        let mut details = ErrorDetails::from_error(err).with_name("HttpError");
        if let Some(status) = status {
            details = details.with_status(status);
        }
        if unreachable {
            details = details.tagged(ErrorCategory::Network);
        }
        RawError::Error(details)
    }
}

impl From<anyhow::Error> for RawError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(categorized) = err.downcast_ref::<CategorizedError>() {
            return RawError::Categorized(categorized.clone());
        }
        let message = format!("{:#}", err);
        let source: Box<dyn StdError + Send + Sync> = err.into();
        RawError::Error(ErrorDetails {
            message,
            source: Some(Arc::from(source)),
            ..ErrorDetails::default()
        })
    }
}

impl From<ResilienceError> for RawError {
    fn from(err: ResilienceError) -> Self {
        RawError::Error(ErrorDetails::from_error(err).with_name("ResilienceError"))
    }
}
