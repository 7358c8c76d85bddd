//! The editor shell.
//!
//! Composes the surface, history log, command dispatcher, keymap and
//! autosave timer behind the external `value`/change contract. Media
//! ingestion and code block insertion live in their own modules as further
//! `impl Editor` blocks.

use inkstone_common::{EditorConfig, Toast};
use inkstone_renderer::render_preview;
use web_time::Instant;

use crate::autosave::AutosaveTimer;
use crate::command::{Command, HeadingLevel};
use crate::history::HistoryLog;
use crate::keymap::{KeyCombo, KeydownResult, Shortcut, resolve_shortcut};
use crate::surface::Surface;
use crate::types::EditorMode;

/// The rich text editor.
///
/// Every committed mutation (formatting command, image insertion, code
/// block insertion) produces a Content Snapshot that is pushed to the
/// history log and returned to the caller; the host forwards it through
/// its change notification. Both the snapshots and the log are session
/// scoped - nothing here persists.
#[derive(Debug)]
pub struct Editor {
    pub(crate) surface: Surface,
    pub(crate) history: HistoryLog,
    pub(crate) mode: EditorMode,
    pub(crate) config: EditorConfig,
    pub(crate) autosave: AutosaveTimer,
    /// Bumped whenever the surface is replaced wholesale; outstanding
    /// media/code-block requests from before the bump are stale.
    pub(crate) generation: u64,
    pub(crate) closed: bool,
}

impl Editor {
    pub fn new(initial: &str, config: EditorConfig) -> Self {
        let autosave = AutosaveTimer::new(initial, config.autosave_debounce_ms);
        Self {
            surface: Surface::from_markup(initial),
            history: HistoryLog::new(initial, config.history_depth),
            mode: EditorMode::Editing,
            config,
            autosave,
            generation: 0,
            closed: false,
        }
    }

    /// The current serialized content.
    pub fn value(&self) -> String {
        self.surface.serialize()
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn is_previewing(&self) -> bool {
        self.mode == EditorMode::Previewing
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn placeholder(&self) -> &str {
        &self.config.placeholder
    }

    /// The placeholder shows over an empty surface in editing mode.
    pub fn placeholder_visible(&self) -> bool {
        self.mode == EditorMode::Editing && self.surface.is_empty()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Select a char range of the content (editing mode only).
    pub fn select(&mut self, start: usize, end: usize) {
        if self.editable() {
            self.surface.select(start, end);
        }
    }

    /// Move the caret (editing mode only).
    pub fn set_caret(&mut self, offset: usize) {
        if self.editable() {
            self.surface.set_caret(offset);
        }
    }

    pub(crate) fn editable(&self) -> bool {
        !self.closed && self.mode == EditorMode::Editing
    }

    // === Command dispatch ===

    /// Apply a named formatting command and return the complete serialized
    /// surface content.
    ///
    /// Unsupported names are a silent no-op (logged, never an error). In
    /// previewing mode every command is inert.
    pub fn apply_command(&mut self, name: &str, argument: Option<&str>) -> String {
        if !self.editable() {
            tracing::debug!(command = name, "command ignored outside editing mode");
            return self.value();
        }

        let Some(command) = Command::parse(name, argument) else {
            tracing::warn!(command = name, ?argument, "unsupported editor command ignored");
            return self.value();
        };

        let changed = command.apply(&mut self.surface);
        let content = self.value();
        if changed {
            self.commit(&content);
        }
        content
    }

    pub fn bold(&mut self) -> String {
        self.apply_command("bold", None)
    }

    pub fn italic(&mut self) -> String {
        self.apply_command("italic", None)
    }

    pub fn bullet_list(&mut self) -> String {
        self.apply_command("insertUnorderedList", None)
    }

    pub fn heading(&mut self, level: HeadingLevel) -> String {
        self.apply_command("formatBlock", Some(level.tag()))
    }

    // === History ===

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Step the history back and restore the surface. Returns the snapshot
    /// now current, or None when there is nothing to undo.
    pub fn undo(&mut self) -> Option<String> {
        if !self.editable() {
            return None;
        }
        let snapshot = self.history.undo()?.to_owned();
        self.surface.set_markup(&snapshot);
        self.autosave.rearm(Instant::now());
        Some(snapshot)
    }

    /// Step the history forward and restore the surface.
    pub fn redo(&mut self) -> Option<String> {
        if !self.editable() {
            return None;
        }
        let snapshot = self.history.redo()?.to_owned();
        self.surface.set_markup(&snapshot);
        self.autosave.rearm(Instant::now());
        Some(snapshot)
    }

    // === Mode ===

    /// Toggle between editing and previewing. Entering editing restores
    /// the surface from the latest snapshot, never from stale surface
    /// state.
    pub fn toggle_preview(&mut self) -> EditorMode {
        self.mode = match self.mode {
            EditorMode::Editing => EditorMode::Previewing,
            EditorMode::Previewing => {
                let snapshot = self.history.current().to_owned();
                self.surface.set_markup(&snapshot);
                EditorMode::Editing
            }
        };
        self.mode
    }

    /// Render the current content for display (the previewing side of the
    /// shell). Pure with respect to the editor state.
    pub fn preview_html(&self) -> String {
        render_preview(&self.value())
    }

    // === External value contract ===

    /// Reconcile an externally supplied value into the surface.
    ///
    /// Applied only when it differs from both the surface's own content
    /// and the current history snapshot, so an echo of our own change
    /// notification never clobbers in-progress state. Returns whether the
    /// surface was updated.
    pub fn sync_external_value(&mut self, next: &str) -> bool {
        if !self.editable() {
            return false;
        }
        if next == self.surface.serialize() || next == self.history.current() {
            return false;
        }
        self.surface.set_markup(next);
        self.generation += 1;
        true
    }

    // === Keyboard ===

    /// Handle a key combination from the host. Returns `Handled` when the
    /// combo mapped to a shortcut (the host should suppress its default).
    pub fn handle_key(&mut self, combo: &KeyCombo, is_mac: bool) -> KeydownResult {
        let Some(shortcut) = resolve_shortcut(combo, is_mac) else {
            return KeydownResult::NotHandled;
        };
        match shortcut {
            Shortcut::Bold => {
                self.bold();
            }
            Shortcut::Italic => {
                self.italic();
            }
            Shortcut::Undo => {
                self.undo();
            }
            Shortcut::Redo => {
                self.redo();
            }
        }
        KeydownResult::Handled
    }

    // === Autosave ===

    /// Drive the debounced autosave check. Returns the "Auto-saved" toast
    /// when the timer has fired and the content changed since the last
    /// observed value.
    pub fn poll_autosave(&mut self, now: Instant) -> Option<Toast> {
        if self.closed {
            return None;
        }
        let value = self.value();
        if self.autosave.poll(now, &value) {
            Some(Toast::info(
                "Auto-saved",
                "Your changes have been automatically saved as a draft.",
            ))
        } else {
            None
        }
    }

    // === Lifecycle ===

    /// Tear the editor down. Outstanding media reads and code block
    /// requests become stale; the autosave timer is cleared.
    pub fn close(&mut self) {
        self.closed = true;
        self.generation += 1;
        self.autosave.clear();
    }

    /// Commit a new Content Snapshot: push to history and re-arm the
    /// autosave debounce.
    pub(crate) fn commit(&mut self, content: &str) {
        self.history.push(content);
        self.autosave.rearm(Instant::now());
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new("", EditorConfig::default())
    }
}
