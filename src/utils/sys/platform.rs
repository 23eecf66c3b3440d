//! Host capabilities the error layer depends on
//!
//! Toast display, connectivity detection and navigation belong to the
//! embedding application. They are injected as trait objects so the layer
//! runs the same in a browser shell, a desktop app or a test.

use crate::utils::error::types::{ResilienceError, Result};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn};

/// Visual kind of a user notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
            NotificationKind::Info => "info",
        }
    }
}

/// User-visible notification surface (toasts, banners)
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink: Send + Sync {
    fn notify(&self, kind: NotificationKind, message: &str) -> Result<()>;

    fn success(&self, message: &str) -> Result<()> {
        self.notify(NotificationKind::Success, message)
    }

    fn error(&self, message: &str) -> Result<()> {
        self.notify(NotificationKind::Error, message)
    }

    fn warning(&self, message: &str) -> Result<()> {
        self.notify(NotificationKind::Warning, message)
    }

    fn info(&self, message: &str) -> Result<()> {
        self.notify(NotificationKind::Info, message)
    }
}

/// Reports whether the host currently has network connectivity
#[cfg_attr(test, mockall::automock)]
pub trait ConnectivityProbe: Send + Sync {
    fn is_online(&self) -> bool;
}

/// Moves the host application to another route
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    fn redirect(&self, path: &str) -> Result<()>;
}

/// Sink that writes notifications to the tracing pipeline.
///
/// Used when the host does not provide a toast surface.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) -> Result<()> {
        match kind {
            NotificationKind::Error => error!(kind = kind.as_str(), "{}", message),
            NotificationKind::Warning => warn!(kind = kind.as_str(), "{}", message),
            NotificationKind::Success | NotificationKind::Info => {
                info!(kind = kind.as_str(), "{}", message)
            }
        }
        Ok(())
    }
}

/// Sink that records every notification in memory
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    sent: Mutex<Vec<(NotificationKind, String)>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications in the order they were sent
    pub fn notifications(&self) -> Vec<(NotificationKind, String)> {
        self.sent.lock().clone()
    }

    pub fn messages_of(&self, kind: NotificationKind) -> Vec<String> {
        self.sent
            .lock()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sent.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.lock().is_empty()
    }

    pub fn clear(&self) {
        self.sent.lock().clear();
    }
}

impl NotificationSink for MemoryNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) -> Result<()> {
        self.sent.lock().push((kind, message.to_string()));
        Ok(())
    }
}

/// Connectivity flag set by the host (or a test)
#[derive(Debug)]
pub struct StaticConnectivity {
    online: AtomicBool,
}

impl StaticConnectivity {
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
        }
    }

    pub fn online() -> Self {
        Self::new(true)
    }

    pub fn offline() -> Self {
        Self::new(false)
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }
}

impl Default for StaticConnectivity {
    fn default() -> Self {
        Self::online()
    }
}

impl ConnectivityProbe for StaticConnectivity {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}

/// Navigator that only logs the requested route
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn redirect(&self, path: &str) -> Result<()> {
        info!(path, "redirect requested");
        Ok(())
    }
}

/// Navigator that records requested routes
#[derive(Debug, Default)]
pub struct MemoryNavigator {
    visited: Mutex<Vec<String>>,
}

impl MemoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn redirects(&self) -> Vec<String> {
        self.visited.lock().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.visited.lock().last().cloned()
    }
}

impl Navigator for MemoryNavigator {
    fn redirect(&self, path: &str) -> Result<()> {
        if path.is_empty() {
            return Err(ResilienceError::navigation("empty route"));
        }
        self.visited.lock().push(path.to_string());
        Ok(())
    }
}
