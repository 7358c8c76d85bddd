//! Transient notification contract.
//!
//! The editor core never renders notifications itself; it hands `Toast`
//! values to a `Notifier` supplied by the host shell. The host decides how
//! (and whether) to display them.

use smol_str::SmolStr;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    /// Neutral information ("Auto-saved").
    Info,
    /// A completed action ("Code copied!").
    Success,
    /// A recoverable failure ("Failed to copy").
    Destructive,
}

/// A transient notification to surface to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: SmolStr,
    pub description: SmolStr,
    pub level: ToastLevel,
}

impl Toast {
    pub fn info(title: impl Into<SmolStr>, description: impl Into<SmolStr>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: ToastLevel::Info,
        }
    }

    pub fn success(title: impl Into<SmolStr>, description: impl Into<SmolStr>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: ToastLevel::Success,
        }
    }

    pub fn destructive(title: impl Into<SmolStr>, description: impl Into<SmolStr>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: ToastLevel::Destructive,
        }
    }
}

/// Sink for transient notifications.
///
/// Implemented by the host UI (toast tray, status line). `MemoryNotifier`
/// is provided for tests and headless use.
pub trait Notifier {
    fn notify(&mut self, toast: Toast);
}

/// Notifier that records toasts in memory.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    pub toasts: Vec<Toast>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Titles of recorded toasts, oldest first.
    pub fn titles(&self) -> Vec<&str> {
        self.toasts.iter().map(|t| t.title.as_str()).collect()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }
}
