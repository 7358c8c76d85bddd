//! Named formatting commands over the surface.
//!
//! The dispatch surface is stringly-typed (`"bold"`, `"formatBlock"` with
//! `"h2"`, ...) to match the host toolbar contract; `Command` is the
//! semantic form. Every transformation computes a full replacement string,
//! keeps the markup balanced via `balanced_cover`, and re-serializes the
//! complete surface.

use std::ops::Range;

use inkstone_markup::{
    ElementSpan, balanced_cover, element_spans, is_block_tag, snap_out_of_tags,
};

use crate::surface::Surface;
use crate::text::TextBuffer;

/// Heading level for the block format command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    pub fn tag(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
        }
    }

    fn parse(argument: &str) -> Option<Self> {
        let name = argument
            .trim()
            .trim_start_matches('<')
            .trim_end_matches('>')
            .to_ascii_lowercase();
        match name.as_str() {
            "h1" => Some(Self::H1),
            "h2" => Some(Self::H2),
            "h3" => Some(Self::H3),
            _ => None,
        }
    }
}

/// A supported formatting command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Wrap (or unwrap) the selection in `<strong>`.
    Bold,
    /// Wrap (or unwrap) the selection in `<em>`.
    Italic,
    /// Turn the block at the caret into a bullet list, or back.
    BulletList,
    /// Re-tag the block at the caret as a heading.
    Heading(HeadingLevel),
}

impl Command {
    /// Resolve a command identifier plus optional argument. Unknown names
    /// (and unusable arguments) are None; the dispatcher treats that as a
    /// silent no-op.
    pub fn parse(name: &str, argument: Option<&str>) -> Option<Self> {
        match name {
            "bold" => Some(Self::Bold),
            "italic" => Some(Self::Italic),
            "insertUnorderedList" => Some(Self::BulletList),
            "formatBlock" => argument.and_then(HeadingLevel::parse).map(Self::Heading),
            _ => None,
        }
    }

    /// Apply to the surface. Returns true when the content changed.
    pub fn apply<B: TextBuffer>(self, surface: &mut Surface<B>) -> bool {
        match self {
            Self::Bold => toggle_inline(surface, "strong"),
            Self::Italic => toggle_inline(surface, "em"),
            Self::BulletList => toggle_bullet_list(surface),
            Self::Heading(level) => format_block(surface, level.tag()),
        }
    }
}

/// Wrap the selection in an inline element, or unwrap when the selection
/// covers exactly an existing wrapper (or its content).
fn toggle_inline<B: TextBuffer>(surface: &mut Surface<B>, tag: &str) -> bool {
    let Some(bytes) = surface.selection_bytes() else {
        tracing::debug!(tag, "inline format without a selection ignored");
        return false;
    };
    if bytes.is_empty() {
        tracing::debug!(tag, "inline format on empty selection ignored");
        return false;
    }

    let content = surface.serialize();
    let cover = balanced_cover(&content, bytes);
    if cover.is_empty() {
        return false;
    }

    let spans = element_spans(&content);
    if let Some(el) = spans
        .iter()
        .find(|el| el.name == tag && (el.inner == cover || el.span == cover))
    {
        // Unwrap: drop the open and close tags, keep the content.
        let mut next = String::with_capacity(content.len());
        next.push_str(&content[..el.span.start]);
        next.push_str(&content[el.open.end..el.inner.end]);
        next.push_str(&content[el.span.end..]);

        let sel = el.span.start..el.span.start + (el.inner.end - el.open.end);
        surface.apply_edit(&next, sel.end, Some(sel));
        return true;
    }

    let mut next = String::with_capacity(content.len() + tag.len() * 2 + 5);
    next.push_str(&content[..cover.start]);
    next.push('<');
    next.push_str(tag);
    next.push('>');
    next.push_str(&content[cover.clone()]);
    next.push_str("</");
    next.push_str(tag);
    next.push('>');
    next.push_str(&content[cover.end..]);

    let open_len = tag.len() + 2;
    let sel = cover.start + open_len..cover.end + open_len;
    surface.apply_edit(&next, sel.end, Some(sel));
    true
}

/// A top-level node: either a block element or a bare run of inline
/// content between blocks.
#[derive(Debug, Clone)]
struct BlockNode {
    range: Range<usize>,
    element: Option<ElementSpan>,
}

fn top_level_blocks(content: &str) -> Vec<BlockNode> {
    let spans = element_spans(content);
    let mut nodes = Vec::new();
    let mut pos = 0;

    for el in spans.iter().filter(|s| s.depth == 0 && is_block_tag(&s.name)) {
        if el.span.start > pos {
            push_bare_run(content, pos..el.span.start, &mut nodes);
        }
        nodes.push(BlockNode {
            range: el.span.clone(),
            element: Some(el.clone()),
        });
        pos = el.span.end;
    }
    if pos < content.len() {
        push_bare_run(content, pos..content.len(), &mut nodes);
    }
    nodes
}

fn push_bare_run(content: &str, gap: Range<usize>, nodes: &mut Vec<BlockNode>) {
    let slice = &content[gap.clone()];
    if slice.trim().is_empty() {
        return;
    }
    let start = gap.start + (slice.len() - slice.trim_start().len());
    let end = gap.start + slice.trim_end().len();
    nodes.push(BlockNode {
        range: start..end,
        element: None,
    });
}

/// The byte position a block command targets: selection start if there is
/// one, else the caret, snapped out of tag tokens.
fn target_pos<B: TextBuffer>(surface: &Surface<B>, content: &str) -> usize {
    let byte = surface
        .selection_bytes()
        .map(|r| r.start)
        .unwrap_or_else(|| surface.buffer().char_to_byte(surface.caret()));
    snap_out_of_tags(content, byte)
}

fn node_at(nodes: &[BlockNode], pos: usize) -> Option<usize> {
    nodes
        .iter()
        .position(|n| n.range.start <= pos && pos < n.range.end)
        .or_else(|| nodes.iter().rposition(|n| n.range.end <= pos))
        .or_else(|| if nodes.is_empty() { None } else { Some(0) })
}

fn format_block<B: TextBuffer>(surface: &mut Surface<B>, tag: &str) -> bool {
    let content = surface.serialize();
    let pos = target_pos(surface, &content);
    let nodes = top_level_blocks(&content);

    let Some(idx) = node_at(&nodes, pos) else {
        // Nothing in the document yet: open a fresh heading block.
        let mut next = content.clone();
        next.insert_str(pos, &format!("<{tag}><br /></{tag}>"));
        surface.apply_edit(&next, pos + tag.len() + 2, None);
        return true;
    };
    let node = nodes[idx].clone();

    match &node.element {
        Some(el) if el.name == tag => false,
        Some(el)
            if matches!(
                el.name.as_str(),
                "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "div" | "blockquote"
            ) =>
        {
            // Re-tag the block, keeping its content.
            let mut next = String::with_capacity(content.len() + 8);
            next.push_str(&content[..el.span.start]);
            next.push('<');
            next.push_str(tag);
            next.push('>');
            next.push_str(&content[el.inner.clone()]);
            next.push_str("</");
            next.push_str(tag);
            next.push('>');
            next.push_str(&content[el.span.end..]);

            let inner_offset = pos.clamp(el.inner.start, el.inner.end) - el.inner.start;
            let caret = el.span.start + tag.len() + 2 + inner_offset;
            surface.apply_edit(&next, caret, None);
            true
        }
        Some(el) => {
            // Lists keep their structure and code block records keep their
            // marker; neither is re-tagged.
            tracing::debug!(block = %el.name, "formatBlock does not apply to this block");
            false
        }
        None => {
            // Promote the bare run to a block.
            let mut next = String::with_capacity(content.len() + 8);
            next.push_str(&content[..node.range.start]);
            next.push('<');
            next.push_str(tag);
            next.push('>');
            next.push_str(&content[node.range.clone()]);
            next.push_str("</");
            next.push_str(tag);
            next.push('>');
            next.push_str(&content[node.range.end..]);

            let caret = pos.clamp(node.range.start, node.range.end) + tag.len() + 2;
            surface.apply_edit(&next, caret, None);
            true
        }
    }
}

fn toggle_bullet_list<B: TextBuffer>(surface: &mut Surface<B>) -> bool {
    let content = surface.serialize();
    let pos = target_pos(surface, &content);
    let nodes = top_level_blocks(&content);

    let Some(idx) = node_at(&nodes, pos) else {
        let mut next = content.clone();
        next.insert_str(pos, "<ul><li><br /></li></ul>");
        surface.apply_edit(&next, pos + "<ul><li>".len(), None);
        return true;
    };
    let node = nodes[idx].clone();

    match &node.element {
        Some(el) if el.name == "ul" => {
            // Unwrap: every item becomes a paragraph again.
            let spans = element_spans(&content);
            let mut replacement = String::new();
            for li in spans.iter().filter(|li| {
                li.name == "li"
                    && li.depth == el.depth + 1
                    && li.span.start >= el.inner.start
                    && li.span.end <= el.inner.end
            }) {
                let item = &content[li.inner.clone()];
                if item.trim().is_empty() {
                    replacement.push_str("<p><br /></p>");
                } else {
                    replacement.push_str("<p>");
                    replacement.push_str(item);
                    replacement.push_str("</p>");
                }
            }
            if replacement.is_empty() {
                replacement.push_str("<p><br /></p>");
            }

            let mut next = String::with_capacity(content.len());
            next.push_str(&content[..el.span.start]);
            next.push_str(&replacement);
            next.push_str(&content[el.span.end..]);

            let caret = el.span.start + replacement.len() - "</p>".len();
            surface.apply_edit(&next, caret, None);
            true
        }
        Some(el) if el.name == "pre" => {
            tracing::debug!("list toggle does not apply to code blocks");
            false
        }
        Some(el) => {
            // Block element becomes a single-item list.
            let inner = &content[el.inner.clone()];
            let item = if inner.is_empty() { "<br />" } else { inner };
            let mut next = String::with_capacity(content.len() + 16);
            next.push_str(&content[..el.span.start]);
            next.push_str("<ul><li>");
            next.push_str(item);
            next.push_str("</li></ul>");
            next.push_str(&content[el.span.end..]);

            let caret = el.span.start + "<ul><li>".len() + item.len();
            surface.apply_edit(&next, caret, None);
            true
        }
        None => {
            let run = &content[node.range.clone()];
            let mut next = String::with_capacity(content.len() + 16);
            next.push_str(&content[..node.range.start]);
            next.push_str("<ul><li>");
            next.push_str(run);
            next.push_str("</li></ul>");
            next.push_str(&content[node.range.end..]);

            let caret = node.range.start + "<ul><li>".len() + run.len();
            surface.apply_edit(&next, caret, None);
            true
        }
    }
}
