//! Structure queries over a fragment: element spans, boundary snapping and
//! balanced range covers.
//!
//! These back the selection handling in the editor: a formatting command
//! may only wrap a byte range that starts and ends outside tag tokens and
//! contains balanced tags, otherwise the snapshot well-formedness invariant
//! breaks.

use std::ops::Range;

use smol_str::SmolStr;

use crate::event::FragmentEvent;
use crate::parser::FragmentParser;

/// Byte geometry of one element in a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSpan {
    pub name: SmolStr,
    /// The open tag token (the whole token for void elements).
    pub open: Range<usize>,
    /// Content between the tags; empty for void elements.
    pub inner: Range<usize>,
    /// Open tag through close tag.
    pub span: Range<usize>,
    /// Nesting depth; 0 is top level.
    pub depth: usize,
}

impl ElementSpan {
    /// Does this element have a separate close tag?
    pub fn has_close(&self) -> bool {
        self.span.end > self.inner.end
    }
}

/// Collect the elements of a fragment in document order of their open tags.
///
/// Tolerant of broken structure: stray closes are ignored and unclosed
/// elements run to the end of the fragment, so this is usable on surface
/// content mid-edit. Use [`crate::validate_fragment`] for the strict check.
pub fn element_spans(fragment: &str) -> Vec<ElementSpan> {
    let mut out: Vec<ElementSpan> = Vec::new();
    // (name, open token span, index into out)
    let mut stack: Vec<(SmolStr, Range<usize>, usize)> = Vec::new();

    for (event, span) in FragmentParser::new(fragment) {
        match event {
            FragmentEvent::Start(tag) => {
                out.push(ElementSpan {
                    name: tag.name.clone(),
                    open: span.clone(),
                    inner: span.end..span.end,
                    span: span.clone(),
                    depth: stack.len(),
                });
                stack.push((tag.name, span, out.len() - 1));
            }
            FragmentEvent::End(name) => {
                let Some(pos) = stack.iter().rposition(|(n, _, _)| *n == name) else {
                    continue; // stray close
                };
                // Anything opened above the match is implicitly closed here.
                while stack.len() > pos + 1 {
                    if let Some((_, open_span, idx)) = stack.pop() {
                        out[idx].inner = open_span.end..span.start;
                        out[idx].span = open_span.start..span.start;
                    }
                }
                if let Some((_, open_span, idx)) = stack.pop() {
                    out[idx].inner = open_span.end..span.start;
                    out[idx].span = open_span.start..span.end;
                }
            }
            FragmentEvent::Void(tag) => {
                out.push(ElementSpan {
                    name: tag.name,
                    open: span.clone(),
                    inner: span.end..span.end,
                    span,
                    depth: stack.len(),
                });
            }
            FragmentEvent::Text(_) => {}
        }
    }

    while let Some((_, open_span, idx)) = stack.pop() {
        out[idx].inner = open_span.end..fragment.len();
        out[idx].span = open_span.start..fragment.len();
    }

    out
}

/// If `offset` lands strictly inside a tag token, move it past the token.
/// Offsets in text runs or between tokens come back unchanged.
pub fn snap_out_of_tags(fragment: &str, offset: usize) -> usize {
    let offset = offset.min(fragment.len());
    for (event, span) in FragmentParser::new(fragment) {
        if span.start >= offset {
            break;
        }
        if offset < span.end && !matches!(event, FragmentEvent::Text(_)) {
            return span.end;
        }
    }
    offset
}

/// Expand `range` to the smallest enclosing range whose tag events are
/// balanced: any element only partially overlapped is pulled in whole.
/// Endpoints inside a tag token are first expanded outward to the token
/// boundary. Wrapping the returned range in an inline element preserves
/// fragment well-formedness.
pub fn balanced_cover(fragment: &str, range: Range<usize>) -> Range<usize> {
    let mut start = range.start.min(fragment.len());
    let mut end = range.end.min(fragment.len());

    // Expand endpoints out of tag tokens.
    for (event, span) in FragmentParser::new(fragment) {
        if matches!(event, FragmentEvent::Text(_)) {
            continue;
        }
        if span.start < start && start < span.end {
            start = span.start;
        }
        if span.start < end && end < span.end {
            end = span.end;
        }
    }

    let elements = element_spans(fragment);
    loop {
        let mut changed = false;
        for element in &elements {
            let opens_inside = element.open.start >= start && element.open.start < end;
            if opens_inside && element.span.end > end {
                end = element.span.end;
                changed = true;
            }
            if element.has_close() {
                let close_start = element.inner.end;
                let closes_inside = close_start >= start && close_start < end;
                if closes_inside && element.span.start < start {
                    start = element.span.start;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    start..end
}
