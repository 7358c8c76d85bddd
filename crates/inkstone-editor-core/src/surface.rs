//! The live editable surface.
//!
//! A `Surface` is the selection-aware document the commands operate on:
//! a text buffer holding serialized markup, a caret and an optional
//! selection. It replaces the browser's content-editable region, so
//! every mutation keeps the markup well-formed - insertion points are
//! snapped out of tag tokens before any edit.

use std::ops::Range;

use inkstone_markup::snap_out_of_tags;

use crate::text::{EditorRope, TextBuffer};
use crate::types::Selection;

/// Selection-aware markup document.
#[derive(Debug, Clone, Default)]
pub struct Surface<B: TextBuffer = EditorRope> {
    buffer: B,
    caret: usize,
    selection: Option<Selection>,
}

impl<B: TextBuffer> Surface<B> {
    /// Build a surface over an existing buffer. The caret starts at the
    /// end of the content.
    pub fn with_buffer(buffer: B) -> Self {
        let caret = buffer.len_chars();
        Self {
            buffer,
            caret,
            selection: None,
        }
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    /// Serialize the complete surface content.
    pub fn serialize(&self) -> String {
        self.buffer.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Replace the whole content. Caret moves to the end, selection is
    /// dropped.
    pub fn set_markup(&mut self, markup: &str) {
        self.buffer.replace(0..self.buffer.len_chars(), markup);
        self.caret = self.buffer.len_chars();
        self.selection = None;
    }

    // === Caret and selection ===

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Move the caret, clamped to the content.
    pub fn set_caret(&mut self, offset: usize) {
        self.caret = offset.min(self.buffer.len_chars());
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Select a char range (normalized and clamped). The caret moves to
    /// the selection end.
    pub fn select(&mut self, start: usize, end: usize) {
        let len = self.buffer.len_chars();
        let sel = Selection::new(start.min(len), end.min(len)).normalize();
        self.caret = sel.end;
        self.selection = Some(sel);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    // === Edits ===

    /// Insert a markup fragment at the caret. The insertion point is
    /// snapped out of any tag token first so the document stays
    /// well-formed. The caret ends up after the fragment.
    pub fn insert_fragment_at_caret(&mut self, fragment: &str) {
        let content = self.serialize();
        let byte = self.buffer.char_to_byte(self.caret);
        let snapped = snap_out_of_tags(&content, byte);
        let offset = self.buffer.byte_to_char(snapped);

        self.buffer.insert(offset, fragment);
        self.caret = offset + fragment.chars().count();
        self.selection = None;
    }

    /// Replace the whole content and position the caret at a byte offset
    /// of the new content, optionally with a selection (also in bytes).
    ///
    /// This is the commit path for commands, which compute their edits on
    /// the serialized string.
    pub(crate) fn apply_edit(
        &mut self,
        markup: &str,
        caret_byte: usize,
        selection_bytes: Option<Range<usize>>,
    ) {
        self.buffer.replace(0..self.buffer.len_chars(), markup);
        self.caret = self.buffer.byte_to_char(caret_byte.min(markup.len()));
        self.selection = selection_bytes.map(|range| {
            Selection::new(
                self.buffer.byte_to_char(range.start.min(markup.len())),
                self.buffer.byte_to_char(range.end.min(markup.len())),
            )
            .normalize()
        });
    }

    /// Current selection as a byte range of the serialized content.
    pub(crate) fn selection_bytes(&self) -> Option<Range<usize>> {
        let sel = self.selection?.normalize();
        Some(self.buffer.char_to_byte(sel.start)..self.buffer.char_to_byte(sel.end))
    }
}

impl Surface<EditorRope> {
    pub fn new() -> Self {
        Self::with_buffer(EditorRope::new())
    }

    pub fn from_markup(markup: &str) -> Self {
        Self::with_buffer(EditorRope::from_str(markup))
    }
}
