//! Maps raw failures onto the error taxonomy
//!
//! Resolution order: an already categorized error is returned as is, then the
//! explicit tag, then the HTTP status, then network keywords in the message,
//! then the backend error code, then the remaining case-insensitive message
//! heuristics, then the structural fallback.

use super::categorized::{CategorizedError, ErrorCategory};
use super::messages::MessageCatalog;
use super::raw::RawError;
use std::sync::Arc;
use tracing::debug;

const NETWORK_KEYWORDS: &[&str] = &["network", "fetch", "connection", "failed to fetch"];
const AUTHENTICATION_KEYWORDS: &[&str] = &["unauthorized", "authentication", "jwt", "token"];
const AUTHORIZATION_KEYWORDS: &[&str] = &["forbidden", "permission"];
const DATABASE_KEYWORDS: &[&str] = &["database", "query", "postgres"];

/// Backend code prefixes for integrity (`23`) and syntax/access (`42`) failures
const DATABASE_CODE_PREFIXES: &[&str] = &["23", "42"];

#[derive(Debug, Clone, Default)]
pub struct ErrorCategorizer {
    messages: Arc<MessageCatalog>,
}

impl ErrorCategorizer {
    pub fn new(messages: MessageCatalog) -> Self {
        Self {
            messages: Arc::new(messages),
        }
    }

    pub fn messages(&self) -> &MessageCatalog {
        &self.messages
    }

    /// Classify any failure value. Total: every input yields a categorized error.
    pub fn categorize<E: Into<RawError>>(&self, error: E) -> CategorizedError {
        let raw = error.into();
        if let RawError::Categorized(err) = raw {
            return err;
        }

        let category = classify(&raw);
        let code = raw
            .code()
            .map(str::to_string)
            .or_else(|| raw.status().map(|status| status.to_string()));

        debug!(
            category = %category,
            code = code.as_deref().unwrap_or(""),
            "categorized error"
        );

        let mut err = CategorizedError::new(category, raw.message())
            .with_user_message(self.messages.for_category(category));
        if let Some(code) = code {
            err = err.with_code(code);
        }
        err.with_original(raw)
    }

    /// Error reported when an operation exceeds its deadline
    pub fn timeout_error(&self, message: impl Into<String>) -> CategorizedError {
        CategorizedError::network(message).with_user_message(self.messages.timeout.as_str())
    }
}

fn classify(raw: &RawError) -> ErrorCategory {
    if let RawError::Error(details) = raw {
        if let Some(tag) = details.tag {
            return tag;
        }
        match details.status {
            Some(401) => return ErrorCategory::Authentication,
            Some(403) => return ErrorCategory::Authorization,
            _ => {}
        }
    }

    let text = raw.message().to_lowercase();
    if contains_any(&text, NETWORK_KEYWORDS) {
        return ErrorCategory::Network;
    }
    if let RawError::Error(details) = raw {
        if details.code.as_deref().is_some_and(is_database_code) {
            return ErrorCategory::Database;
        }
    }

    if contains_any(&text, AUTHENTICATION_KEYWORDS) {
        ErrorCategory::Authentication
    } else if contains_any(&text, AUTHORIZATION_KEYWORDS) {
        ErrorCategory::Authorization
    } else if contains_any(&text, DATABASE_KEYWORDS) {
        ErrorCategory::Database
    } else if raw.is_structured() {
        ErrorCategory::Runtime
    } else {
        ErrorCategory::Unknown
    }
}

fn is_database_code(code: &str) -> bool {
    DATABASE_CODE_PREFIXES
        .iter()
        .any(|prefix| code.starts_with(prefix))
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}
