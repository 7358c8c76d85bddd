//! inkstone-editor-core: the rich-text editing and undo/redo subsystem.
//!
//! This crate provides:
//! - `TextBuffer` trait and the ropey-backed `EditorRope`
//! - `Surface` - the selection-aware live document
//! - `HistoryLog` - linear snapshot undo/redo
//! - `Command` - named formatting operations over the surface
//! - media ingestion and code block insertion (two-phase, host-driven)
//! - `Editor` - the shell composing all of the above, with the
//!   editing/previewing state machine, keymap and autosave
//!
//! Documents are markup fragment strings (see `inkstone-markup`); every
//! committed mutation produces a Content Snapshot that goes through the
//! history log and out to the host.

pub mod autosave;
pub mod codeblock;
pub mod command;
pub mod editor;
pub mod history;
pub mod keymap;
pub mod media;
pub mod surface;
pub mod text;
pub mod types;

pub use autosave::AutosaveTimer;
pub use codeblock::CodeBlockRequest;
pub use command::{Command, HeadingLevel};
pub use editor::Editor;
pub use history::HistoryLog;
pub use keymap::{Key, KeyCombo, KeydownResult, Modifiers, Shortcut, resolve_shortcut};
pub use media::{IncomingFile, PendingImage};
pub use surface::Surface;
pub use text::{EditorRope, TextBuffer};
pub use types::{EditorMode, Selection};
