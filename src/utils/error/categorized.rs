//! Categorized errors: taxonomy, severity and the safe user-facing envelope

use super::messages::MessageCatalog;
use super::raw::RawError;
use crate::utils::logging::{LogContext, LogLevel};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};
use thiserror::Error;

/// Mutually exclusive, exhaustive failure classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    Network,
    Validation,
    Authentication,
    Authorization,
    Database,
    BusinessLogic,
    Runtime,
    Unknown,
}

impl ErrorCategory {
    pub const ALL: [ErrorCategory; 8] = [
        ErrorCategory::Network,
        ErrorCategory::Validation,
        ErrorCategory::Authentication,
        ErrorCategory::Authorization,
        ErrorCategory::Database,
        ErrorCategory::BusinessLogic,
        ErrorCategory::Runtime,
        ErrorCategory::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "NETWORK",
            ErrorCategory::Validation => "VALIDATION",
            ErrorCategory::Authentication => "AUTHENTICATION",
            ErrorCategory::Authorization => "AUTHORIZATION",
            ErrorCategory::Database => "DATABASE",
            ErrorCategory::BusinessLogic => "BUSINESS_LOGIC",
            ErrorCategory::Runtime => "RUNTIME",
            ErrorCategory::Unknown => "UNKNOWN",
        }
    }

    pub fn default_severity(&self) -> ErrorSeverity {
        match self {
            ErrorCategory::Network | ErrorCategory::Authentication | ErrorCategory::Database => {
                ErrorSeverity::High
            }
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Authorization
            | ErrorCategory::BusinessLogic
            | ErrorCategory::Runtime
            | ErrorCategory::Unknown => ErrorSeverity::Medium,
        }
    }

    /// Permission problems are never handed to recovery strategies.
    pub fn default_recoverable(&self) -> bool {
        !matches!(self, ErrorCategory::Authorization)
    }

    /// Categories `retry_async` retries when no predicate is supplied
    pub fn is_transient(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Database)
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered urgency tag, independent of category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorSeverity::Low => "LOW",
            ErrorSeverity::Medium => "MEDIUM",
            ErrorSeverity::High => "HIGH",
            ErrorSeverity::Critical => "CRITICAL",
        }
    }

    /// Level a handled error of this severity is logged at
    pub fn log_level(&self) -> LogLevel {
        match self {
            ErrorSeverity::Low => LogLevel::Info,
            ErrorSeverity::Medium => LogLevel::Warn,
            ErrorSeverity::High => LogLevel::Error,
            ErrorSeverity::Critical => LogLevel::Fatal,
        }
    }
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_catalog() -> &'static MessageCatalog {
    static CATALOG: OnceLock<MessageCatalog> = OnceLock::new();
    CATALOG.get_or_init(MessageCatalog::default)
}

/// A classified failure.
///
/// `Display` shows the internal message; UI code must only ever render
/// [`CategorizedError::user_message`].
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct CategorizedError {
    category: ErrorCategory,
    severity: ErrorSeverity,
    code: Option<String>,
    message: String,
    user_message: String,
    recoverable: bool,
    context: Option<LogContext>,
    original: Option<Arc<RawError>>,
    timestamp: chrono::DateTime<chrono::Utc>,
}

impl CategorizedError {
    /// New error with the category's default severity, recoverability and
    /// (English) user message.
    pub fn new<S: Into<String>>(category: ErrorCategory, message: S) -> Self {
        Self {
            category,
            severity: category.default_severity(),
            code: None,
            message: message.into(),
            user_message: default_catalog().for_category(category).to_string(),
            recoverable: category.default_recoverable(),
            context: None,
            original: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorCategory::Network, message)
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorCategory::Validation, message)
    }

    pub fn authentication<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorCategory::Authentication, message)
    }

    pub fn authorization<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorCategory::Authorization, message)
    }

    pub fn database<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorCategory::Database, message)
    }

    pub fn business_logic<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorCategory::BusinessLogic, message)
    }

    pub fn runtime<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorCategory::Runtime, message)
    }

    pub fn with_severity(mut self, severity: ErrorSeverity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_code<S: Into<String>>(mut self, code: S) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_user_message<S: Into<String>>(mut self, user_message: S) -> Self {
        self.user_message = user_message.into();
        self
    }

    /// Authorization errors stay non-recoverable whatever is requested.
    pub fn with_recoverable(mut self, recoverable: bool) -> Self {
        self.recoverable = recoverable && self.category.default_recoverable();
        self
    }

    /// Shallow-merges `context` into any context already attached.
    pub fn with_context(mut self, context: LogContext) -> Self {
        self.context = Some(match self.context.take() {
            Some(existing) => existing.merge(context),
            None => context,
        });
        self
    }

    pub(crate) fn with_original(mut self, original: RawError) -> Self {
        self.original = Some(Arc::new(original));
        self
    }

    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    pub fn severity(&self) -> ErrorSeverity {
        self.severity
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Internal diagnostic message; never shown to end users
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn user_message(&self) -> &str {
        &self.user_message
    }

    pub fn is_recoverable(&self) -> bool {
        self.recoverable
    }

    pub fn context(&self) -> Option<&LogContext> {
        self.context.as_ref()
    }

    pub fn original(&self) -> Option<&RawError> {
        self.original.as_deref()
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::Utc> {
        self.timestamp
    }

    /// Context for log entries: the error's own context plus its classification
    pub fn log_context(&self) -> LogContext {
        let mut ctx = self
            .context
            .clone()
            .unwrap_or_default()
            .with_metadata("category", self.category.as_str())
            .with_metadata("severity", self.severity.as_str())
            .with_metadata("recoverable", self.recoverable);
        if let Some(code) = &self.code {
            ctx = ctx.with_metadata("code", code.as_str());
        }
        ctx
    }
}
