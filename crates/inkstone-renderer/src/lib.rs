//! inkstone-renderer: preview rendering for editor snapshots.
//!
//! The preview pass rewrites every code block record
//! (`<pre data-language="...">`) into a styled widget with a language
//! label, a copy button carrying the verbatim code, and a highlighted code
//! region. Everything else in the snapshot passes through byte-for-byte.
//!
//! The copy side lives here too: [`copy_code`] decodes a widget's payload,
//! writes it through the host's [`Clipboard`] and reports the outcome as a
//! toast.

pub mod copy;
#[cfg(feature = "syntax-highlighting")]
pub mod highlight;
pub mod preview;

pub use copy::{Clipboard, ClipboardError, MemoryClipboard, copy_code};
pub use preview::render_preview;
