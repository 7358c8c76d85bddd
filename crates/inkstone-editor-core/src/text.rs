//! Text buffer abstraction for the editing surface.
//!
//! The `TextBuffer` trait keeps the surface independent of its storage;
//! `EditorRope` is the ropey-backed implementation used for local editing.
//!
//! All offsets are in Unicode scalar values (chars), not bytes. The buffer
//! holds the serialized markup of the document; tag awareness lives a layer
//! up, in `Surface`.

use std::ops::Range;

use smol_str::{SmolStr, ToSmolStr};

/// A text buffer with efficient editing and offset conversion.
pub trait TextBuffer {
    /// Total length in bytes (UTF-8).
    fn len_bytes(&self) -> usize;

    /// Total length in chars (Unicode scalar values).
    fn len_chars(&self) -> usize;

    /// Check if empty.
    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// Insert text at char offset. Out-of-range offsets clamp to the end.
    fn insert(&mut self, char_offset: usize, text: &str);

    /// Delete a char range. The range is clamped to the buffer.
    fn delete(&mut self, char_range: Range<usize>);

    /// Replace a char range with text.
    fn replace(&mut self, char_range: Range<usize>, text: &str) {
        self.delete(char_range.clone());
        self.insert(char_range.start, text);
    }

    /// Get a slice as SmolStr. Returns None if the range is invalid.
    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr>;

    /// Get the character at an offset. Returns None if out of bounds.
    fn char_at(&self, char_offset: usize) -> Option<char>;

    /// The whole buffer as a String.
    fn to_string(&self) -> String;

    /// Convert a char offset to a byte offset.
    fn char_to_byte(&self, char_offset: usize) -> usize;

    /// Convert a byte offset to a char offset.
    fn byte_to_char(&self, byte_offset: usize) -> usize;
}

/// Ropey-backed text buffer.
///
/// O(log n) edits and offset conversions; documents here are blog posts,
/// so this is comfortably oversized rather than necessary.
#[derive(Debug, Clone, Default)]
pub struct EditorRope {
    rope: ropey::Rope,
}

impl EditorRope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_str(s: &str) -> Self {
        Self {
            rope: ropey::Rope::from_str(s),
        }
    }
}

impl TextBuffer for EditorRope {
    fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn insert(&mut self, char_offset: usize, text: &str) {
        let offset = char_offset.min(self.rope.len_chars());
        self.rope.insert(offset, text);
    }

    fn delete(&mut self, char_range: Range<usize>) {
        let end = char_range.end.min(self.rope.len_chars());
        let start = char_range.start.min(end);
        self.rope.remove(start..end);
    }

    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr> {
        if char_range.start > char_range.end || char_range.end > self.rope.len_chars() {
            return None;
        }
        Some(self.rope.slice(char_range).to_smolstr())
    }

    fn char_at(&self, char_offset: usize) -> Option<char> {
        if char_offset >= self.rope.len_chars() {
            return None;
        }
        Some(self.rope.char(char_offset))
    }

    fn to_string(&self) -> String {
        self.rope.to_string()
    }

    fn char_to_byte(&self, char_offset: usize) -> usize {
        self.rope
            .char_to_byte(char_offset.min(self.rope.len_chars()))
    }

    fn byte_to_char(&self, byte_offset: usize) -> usize {
        self.rope
            .byte_to_char(byte_offset.min(self.rope.len_bytes()))
    }
}

impl From<&str> for EditorRope {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

impl From<String> for EditorRope {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_editing() {
        let mut rope = EditorRope::from_str("<p>hello</p>");
        rope.insert(8, " world");
        assert_eq!(rope.to_string(), "<p>hello world</p>");

        rope.delete(8..14);
        assert_eq!(rope.to_string(), "<p>hello</p>");

        rope.replace(3..8, "bye");
        assert_eq!(rope.to_string(), "<p>bye</p>");
    }

    #[test]
    fn out_of_range_edits_clamp() {
        let mut rope = EditorRope::from_str("ab");
        rope.insert(99, "c");
        assert_eq!(rope.to_string(), "abc");
        rope.delete(1..99);
        assert_eq!(rope.to_string(), "a");
    }

    #[test]
    fn offset_conversion_with_multibyte_chars() {
        // The snowman is 3 bytes, 1 char.
        let rope = EditorRope::from_str("a☃b");
        assert_eq!(rope.len_chars(), 3);
        assert_eq!(rope.len_bytes(), 5);
        assert_eq!(rope.char_to_byte(2), 4);
        assert_eq!(rope.byte_to_char(4), 2);
    }

    #[test]
    fn slice_and_char_at_bounds() {
        let rope = EditorRope::from_str("abc");
        assert_eq!(rope.slice(0..2).as_deref(), Some("ab"));
        assert_eq!(rope.slice(0..4), None);
        assert_eq!(rope.char_at(2), Some('c'));
        assert_eq!(rope.char_at(3), None);
    }
}
