//! Syntax highlighting for preview code regions.
//!
//! Class-based output so themes stay in CSS: spans carry classes prefixed
//! with [`CSS_PREFIX`] and the host ships light/dark rules for them. The
//! syntax set is the syntect default bundle, loaded once.

use std::sync::LazyLock;

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// Class prefix for generated spans.
pub const CSS_PREFIX: &str = "code-";

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// Highlight `code` as `language`.
///
/// Returns None when the language token is unknown to the default syntax
/// set or highlighting fails; callers fall back to plain escaped code. The
/// code text itself is not modified - highlighting only wraps it.
pub fn highlight(language: &str, code: &str) -> Option<String> {
    let syntax = SYNTAX_SET.find_syntax_by_token(language)?;

    let mut generator = ClassedHTMLGenerator::new_with_class_style(
        syntax,
        &SYNTAX_SET,
        ClassStyle::SpacedPrefixed { prefix: CSS_PREFIX },
    );
    for line in LinesWithEndings::from(code) {
        if let Err(err) = generator.parse_html_for_line_which_includes_newline(line) {
            tracing::warn!(%language, %err, "highlighting failed, falling back to plain code");
            return None;
        }
    }
    Some(generator.finalize())
}
