//! Keyboard shortcut resolution.
//!
//! Platform-agnostic key representation; the host converts its native key
//! events into `KeyCombo` and feeds them to `Editor::handle_key`. Only the
//! editor's own shortcuts are resolved here - everything else reports
//! `NotHandled` so the platform keeps its default behavior.

use smol_str::SmolStr;

/// Key values relevant to the editor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A character key, as produced by the layout.
    Character(SmolStr),
    Backspace,
    Delete,
    Enter,
    Tab,
    Escape,
    /// Anything the host could not classify.
    Unidentified,
}

impl Key {
    pub fn character(s: impl Into<SmolStr>) -> Self {
        Self::Character(s.into())
    }
}

/// Modifier state for a key combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    pub const META: Self = Self {
        meta: true,
        ..Self::NONE
    };

    pub const CTRL_SHIFT: Self = Self {
        ctrl: true,
        shift: true,
        ..Self::NONE
    };

    pub const META_SHIFT: Self = Self {
        meta: true,
        shift: true,
        ..Self::NONE
    };

    /// The platform's primary modifier: Cmd on Mac, Ctrl elsewhere.
    pub fn primary(is_mac: bool) -> Self {
        if is_mac { Self::META } else { Self::CTRL }
    }

    fn has_primary(&self, is_mac: bool) -> bool {
        if is_mac { self.meta } else { self.ctrl }
    }
}

/// A key plus modifier state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

/// Editor shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Bold,
    Italic,
    Undo,
    Redo,
}

/// Result of offering a key event to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeydownResult {
    /// The combo mapped to a shortcut; suppress the platform default.
    Handled,
    /// Not an editor shortcut; let the platform handle it.
    NotHandled,
}

/// Resolve a combo against the editor keymap: primary+B/I for formatting,
/// primary+Z / primary+Shift+Z / primary+Y for history.
pub fn resolve_shortcut(combo: &KeyCombo, is_mac: bool) -> Option<Shortcut> {
    if !combo.modifiers.has_primary(is_mac) || combo.modifiers.alt {
        return None;
    }

    let Key::Character(c) = &combo.key else {
        return None;
    };
    let shift = combo.modifiers.shift;

    match c.to_ascii_lowercase().as_str() {
        "b" if !shift => Some(Shortcut::Bold),
        "i" if !shift => Some(Shortcut::Italic),
        "z" => Some(if shift { Shortcut::Redo } else { Shortcut::Undo }),
        "y" if !shift => Some(Shortcut::Redo),
        _ => None,
    }
}
