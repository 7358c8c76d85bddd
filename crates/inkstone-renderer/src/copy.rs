//! The copy action behind code block widgets.
//!
//! The widget's `data-code` attribute carries the percent-encoded verbatim
//! code. Activating the copy control decodes it and writes the original
//! text - never the escaped form - through the host's clipboard, reporting
//! the outcome as a toast.

use inkstone_common::{Notifier, Toast};
use inkstone_markup::decode_copy_payload;

/// Clipboard write failure, as reported by the host platform.
#[derive(Debug, Clone, thiserror::Error, miette::Diagnostic)]
#[error("clipboard rejected the write: {reason}")]
#[diagnostic(code(inkstone::renderer::clipboard))]
pub struct ClipboardError {
    pub reason: String,
}

impl ClipboardError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Host clipboard access. Browser hosts bridge to the async clipboard API,
/// native hosts to the system clipboard; tests use [`MemoryClipboard`].
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard that stores the last write in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_owned());
        Ok(())
    }
}

/// Decode a widget payload and copy the code it carries.
///
/// Returns whether the copy succeeded. Both failure paths (undecodable
/// payload, clipboard rejection) surface the same non-fatal failure toast.
pub fn copy_code<C, N>(encoded: &str, clipboard: &mut C, notifier: &mut N) -> bool
where
    C: Clipboard + ?Sized,
    N: Notifier + ?Sized,
{
    let code = match decode_copy_payload(encoded) {
        Ok(code) => code,
        Err(err) => {
            tracing::warn!(%err, "copy payload failed to decode");
            notifier.notify(copy_failed());
            return false;
        }
    };

    match clipboard.write_text(&code) {
        Ok(()) => {
            notifier.notify(Toast::success(
                "Code copied!",
                "The code block has been copied to your clipboard.",
            ));
            true
        }
        Err(err) => {
            tracing::warn!(%err, "clipboard write failed");
            notifier.notify(copy_failed());
            false
        }
    }
}

fn copy_failed() -> Toast {
    Toast::destructive("Failed to copy", "Could not copy code to clipboard.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkstone_common::{MemoryNotifier, ToastLevel};
    use inkstone_markup::encode_copy_payload;

    struct RejectingClipboard;

    impl Clipboard for RejectingClipboard {
        fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::new("permission denied"))
        }
    }

    #[test]
    fn copies_the_exact_original_text() {
        let mut clipboard = MemoryClipboard::new();
        let mut notifier = MemoryNotifier::new();
        let encoded = encode_copy_payload("print(1)");

        assert!(copy_code(&encoded, &mut clipboard, &mut notifier));
        assert_eq!(clipboard.contents.as_deref(), Some("print(1)"));
        assert_eq!(notifier.titles(), vec!["Code copied!"]);
    }

    #[test]
    fn clipboard_failure_is_a_toast_not_an_error() {
        let mut clipboard = RejectingClipboard;
        let mut notifier = MemoryNotifier::new();
        let encoded = encode_copy_payload("x");

        assert!(!copy_code(&encoded, &mut clipboard, &mut notifier));
        assert_eq!(notifier.toasts[0].level, ToastLevel::Destructive);
        assert_eq!(notifier.titles(), vec!["Failed to copy"]);
    }

    #[test]
    fn malformed_payload_is_a_toast_not_an_error() {
        let mut clipboard = MemoryClipboard::new();
        let mut notifier = MemoryNotifier::new();

        assert!(!copy_code("%2", &mut clipboard, &mut notifier));
        assert!(clipboard.contents.is_none());
        assert_eq!(notifier.titles(), vec!["Failed to copy"]);
    }
}
