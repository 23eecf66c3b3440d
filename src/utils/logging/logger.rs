//! Leveled, ring-buffered logger
//!
//! Every accepted entry lands in a bounded in-memory buffer (oldest evicted
//! first). In development the entry is also emitted through `tracing`; in
//! production only FATAL entries are emitted.

use super::types::{LogContext, LogEntry, LogLevel};
use crate::config::{Environment, LoggingConfig};
use parking_lot::{Mutex, RwLock};
use std::collections::VecDeque;
use std::fmt::Write;
use tracing::{debug, error, info, warn};

/// Placeholder stored when a cause cannot be rendered
const UNRENDERABLE_CAUSE: &str = "<unrenderable error>";

pub struct Logger {
    min_level: RwLock<LogLevel>,
    capacity: usize,
    environment: Environment,
    capture_backtraces: bool,
    buffer: Mutex<VecDeque<LogEntry>>,
    groups: Mutex<Vec<String>>,
}

impl Logger {
    pub fn new(config: &LoggingConfig, environment: Environment) -> Self {
        let capacity = config.capacity.max(1);
        Self {
            min_level: RwLock::new(config.effective_min_level(environment)),
            capacity,
            environment,
            capture_backtraces: config.capture_backtraces,
            buffer: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
            groups: Mutex::new(Vec::new()),
        }
    }

    /// Verbose logger: DEBUG and above, console emission on
    pub fn development() -> Self {
        Self::new(&LoggingConfig::default(), Environment::Development)
    }

    /// Quiet logger: WARN and above, only FATAL reaches the console
    pub fn production() -> Self {
        Self::new(&LoggingConfig::default(), Environment::Production)
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn level(&self) -> LogLevel {
        *self.min_level.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    pub fn log(
        &self,
        level: LogLevel,
        message: &str,
        context: Option<LogContext>,
        error: Option<&(dyn std::error::Error + '_)>,
    ) {
        if !self.enabled(level) {
            return;
        }

        let mut entry = LogEntry::new(level, message.to_string());

        let context = self.with_group_path(context);
        if let Some(ctx) = context {
            entry = entry.with_context(ctx);
        }
        if let Some(err) = error {
            entry = entry.with_error(render_cause(err));
        }
        if self.capture_backtraces && level >= LogLevel::Error {
            entry = entry.with_stack(std::backtrace::Backtrace::force_capture().to_string());
        }

        if self.environment.is_development() || level == LogLevel::Fatal {
            emit(&entry);
        }

        let mut buffer = self.buffer.lock();
        while buffer.len() >= self.capacity {
            buffer.pop_front();
        }
        buffer.push_back(entry);
    }

    pub fn debug(
        &self,
        message: &str,
        context: Option<LogContext>,
        error: Option<&(dyn std::error::Error + '_)>,
    ) {
        self.log(LogLevel::Debug, message, context, error);
    }

    pub fn info(
        &self,
        message: &str,
        context: Option<LogContext>,
        error: Option<&(dyn std::error::Error + '_)>,
    ) {
        self.log(LogLevel::Info, message, context, error);
    }

    pub fn warn(
        &self,
        message: &str,
        context: Option<LogContext>,
        error: Option<&(dyn std::error::Error + '_)>,
    ) {
        self.log(LogLevel::Warn, message, context, error);
    }

    pub fn error(
        &self,
        message: &str,
        context: Option<LogContext>,
        error: Option<&(dyn std::error::Error + '_)>,
    ) {
        self.log(LogLevel::Error, message, context, error);
    }

    pub fn fatal(
        &self,
        message: &str,
        context: Option<LogContext>,
        error: Option<&(dyn std::error::Error + '_)>,
    ) {
        self.log(LogLevel::Fatal, message, context, error);
    }

    /// Snapshot of the most recent `count` entries (all when `None`), oldest first
    pub fn get_recent_logs(&self, count: Option<usize>) -> Vec<LogEntry> {
        let buffer = self.buffer.lock();
        let skip = count.map_or(0, |n| buffer.len().saturating_sub(n));
        buffer.iter().skip(skip).cloned().collect()
    }

    pub fn get_logs_by_level(&self, level: LogLevel) -> Vec<LogEntry> {
        self.buffer
            .lock()
            .iter()
            .filter(|entry| entry.level == level)
            .cloned()
            .collect()
    }

    pub fn clear_logs(&self) {
        self.buffer.lock().clear();
    }

    /// Open a nested label; no-op outside development
    pub fn group(&self, label: &str) {
        if !self.environment.is_development() {
            return;
        }
        let mut groups = self.groups.lock();
        groups.push(label.to_string());
        debug!(group = %groups.join("/"), "group start");
    }

    pub fn group_end(&self) {
        if !self.environment.is_development() {
            return;
        }
        let mut groups = self.groups.lock();
        if let Some(label) = groups.pop() {
            debug!(group = %label, "group end");
        }
    }

    /// The buffer as a JSON array; `"[]"` if serialization fails
    pub fn export_logs(&self) -> String {
        let snapshot = self.get_recent_logs(None);
        serde_json::to_string(&snapshot).unwrap_or_else(|_| "[]".to_string())
    }

    fn with_group_path(&self, context: Option<LogContext>) -> Option<LogContext> {
        let groups = self.groups.lock();
        if groups.is_empty() {
            return context;
        }
        let path = groups.join("/");
        Some(context.unwrap_or_default().with_metadata("group", path))
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.level())
            .field("capacity", &self.capacity)
            .field("environment", &self.environment)
            .field("len", &self.len())
            .finish()
    }
}

/// Renders an error and its source chain. `ToString` would panic on a failing
/// `Display` impl; `write!` reports it instead.
fn render_cause(error: &(dyn std::error::Error + '_)) -> String {
    let mut rendered = String::new();
    if write!(rendered, "{}", error).is_err() {
        return UNRENDERABLE_CAUSE.to_string();
    }
    let mut source = error.source();
    while let Some(cause) = source {
        let mut segment = String::new();
        if write!(segment, "{}", cause).is_err() {
            break;
        }
        // wrappers often repeat their source's text
        if !rendered.ends_with(&segment) {
            rendered.push_str(": ");
            rendered.push_str(&segment);
        }
        source = cause.source();
    }
    rendered
}

fn emit(entry: &LogEntry) {
    let context = entry.context.as_ref();
    let cause = entry.error.as_deref();
    match entry.level {
        LogLevel::Debug => debug!(context = ?context, cause = ?cause, "{}", entry.message),
        LogLevel::Info => info!(context = ?context, cause = ?cause, "{}", entry.message),
        LogLevel::Warn => warn!(context = ?context, cause = ?cause, "{}", entry.message),
        LogLevel::Error => error!(context = ?context, cause = ?cause, "{}", entry.message),
        LogLevel::Fatal => {
            error!(fatal = true, context = ?context, cause = ?cause, "{}", entry.message)
        }
    }
}
