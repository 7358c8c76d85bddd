//! Programmatic fragment construction.
//!
//! Everything injected into the surface (code blocks, embedded images) goes
//! through `FragmentBuilder`, which escapes text and attribute values as it
//! writes. Output from a balanced builder always passes
//! [`crate::validate_fragment`].

use smol_str::SmolStr;

use crate::escape::{escape_attribute, escape_html};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Pending {
    #[default]
    None,
    /// An open tag whose `>` has not been written yet.
    Open,
    /// A void tag awaiting its ` />`.
    Void,
}

/// Incremental fragment writer.
///
/// ```
/// use inkstone_markup::FragmentBuilder;
///
/// let mut b = FragmentBuilder::new();
/// b.start("pre")
///     .attr("data-language", "rust")
///     .start("code")
///     .text("fn main() {}")
///     .end()
///     .end();
/// assert_eq!(
///     b.finish(),
///     r#"<pre data-language="rust"><code>fn main() {}</code></pre>"#
/// );
/// ```
#[derive(Debug, Default)]
pub struct FragmentBuilder {
    out: String,
    stack: Vec<SmolStr>,
    pending: Pending,
}

impl FragmentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn close_pending(&mut self) {
        match self.pending {
            Pending::None => {}
            Pending::Open => self.out.push('>'),
            Pending::Void => self.out.push_str(" />"),
        }
        self.pending = Pending::None;
    }

    /// Open an element.
    pub fn start(&mut self, name: impl Into<SmolStr>) -> &mut Self {
        self.close_pending();
        let name = name.into();
        self.out.push('<');
        self.out.push_str(&name);
        self.stack.push(name);
        self.pending = Pending::Open;
        self
    }

    /// Write a void element (`<br />`, `<img ... />`).
    pub fn void(&mut self, name: impl Into<SmolStr>) -> &mut Self {
        self.close_pending();
        self.out.push('<');
        self.out.push_str(&name.into());
        self.pending = Pending::Void;
        self
    }

    /// Add an attribute to the tag opened by the preceding `start`/`void`.
    /// Ignored (with a debug assertion) anywhere else.
    pub fn attr(&mut self, name: &str, value: &str) -> &mut Self {
        debug_assert!(
            self.pending != Pending::None,
            "attr() must follow start() or void()"
        );
        if self.pending != Pending::None {
            self.out.push(' ');
            self.out.push_str(name);
            self.out.push_str("=\"");
            self.out.push_str(&escape_attribute(value));
            self.out.push('"');
        }
        self
    }

    /// Write escaped text content.
    pub fn text(&mut self, text: &str) -> &mut Self {
        self.close_pending();
        self.out.push_str(&escape_html(text));
        self
    }

    /// Write pre-rendered markup verbatim. The caller vouches for its
    /// balance.
    pub fn raw(&mut self, markup: &str) -> &mut Self {
        self.close_pending();
        self.out.push_str(markup);
        self
    }

    /// Close the innermost open element.
    pub fn end(&mut self) -> &mut Self {
        self.close_pending();
        if let Some(name) = self.stack.pop() {
            self.out.push_str("</");
            self.out.push_str(&name);
            self.out.push('>');
        } else {
            debug_assert!(false, "end() with no open element");
        }
        self
    }

    /// Finish the fragment, closing any pending tag token (but not open
    /// elements; a balanced build has none left).
    pub fn finish(mut self) -> String {
        self.close_pending();
        debug_assert!(self.stack.is_empty(), "unclosed elements: {:?}", self.stack);
        self.out
    }
}
