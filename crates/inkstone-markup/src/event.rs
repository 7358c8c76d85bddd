//! Fragment events and tag classification.

use smol_str::SmolStr;

/// One attribute on a tag. Values are stored entity-decoded, the way a DOM
/// `getAttribute` would report them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: SmolStr,
    pub value: String,
}

/// A parsed open or void tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentTag {
    pub name: SmolStr,
    pub attrs: Vec<Attribute>,
}

impl FragmentTag {
    /// Look up an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }
}

/// One event pulled from a fragment.
///
/// `Text` is the raw source slice - entities are left encoded so the event
/// stream can be spliced back byte-for-byte. Use [`crate::unescape`] when
/// the decoded text is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentEvent<'a> {
    /// An opening tag with content to follow.
    Start(FragmentTag),
    /// A closing tag.
    End(SmolStr),
    /// A void tag (`<br />`, `<img ... />`) with no content.
    Void(FragmentTag),
    /// A raw text run between tags.
    Text(&'a str),
}

/// Elements that never carry content. A bare `<br>` is treated the same as
/// `<br />`.
pub fn is_void_tag(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Block-level elements, as far as the editing surface is concerned.
pub fn is_block_tag(name: &str) -> bool {
    matches!(
        name,
        "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "ul" | "ol" | "li" | "pre" | "div"
            | "blockquote"
    )
}
