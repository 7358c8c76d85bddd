//! Snapshot-to-preview transformation.

use std::ops::Range;

use smol_str::SmolStr;

use inkstone_markup::{
    FragmentBuilder, FragmentEvent, FragmentParser, element_spans, encode_copy_payload, unescape,
};

// Copy icon from the editor toolbar set, inlined so the preview has no
// asset dependency.
const COPY_ICON: &str = concat!(
    r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">"#,
    r#"<rect width="14" height="14" x="8" y="8" rx="2" ry="2"/>"#,
    r#"<path d="m4 16c-1.1 0-2-.9-2-2V4c0-1.1.9-2 2-2h10c1.1 0 2 .9 2 2"/>"#,
    r#"</svg>"#,
);

/// One code block record located in a snapshot.
#[derive(Debug)]
struct CodeBlockRecord {
    /// Byte range of the whole `<pre ...>...</pre>` element.
    span: Range<usize>,
    language: SmolStr,
    /// Verbatim code text (entities decoded).
    code: String,
}

/// Render a Content Snapshot for display.
///
/// Pure: the input is not modified. Each `pre[data-language]` element is
/// replaced by a widget; the `data-language` marker is consumed in the
/// process, so rendering already-rendered output changes nothing.
pub fn render_preview(snapshot: &str) -> String {
    let records = find_code_blocks(snapshot);
    if records.is_empty() {
        return snapshot.to_owned();
    }

    let mut out = String::with_capacity(snapshot.len() + records.len() * 256);
    let mut last = 0;
    for record in &records {
        out.push_str(&snapshot[last..record.span.start]);
        out.push_str(&render_widget(record));
        last = record.span.end;
    }
    out.push_str(&snapshot[last..]);
    out
}

fn find_code_blocks(snapshot: &str) -> Vec<CodeBlockRecord> {
    let spans = element_spans(snapshot);
    let mut records: Vec<CodeBlockRecord> = Vec::new();

    for pre in spans.iter().filter(|s| s.name == "pre") {
        // Skip anything inside an already-claimed record.
        if records
            .iter()
            .any(|r| r.span.start <= pre.span.start && pre.span.end <= r.span.end)
        {
            continue;
        }

        let Some(language) = language_of(&snapshot[pre.open.clone()]) else {
            continue;
        };

        // The record body is the text content of the first nested <code>
        // element; a marker without one carries an empty body.
        let code = spans
            .iter()
            .find(|c| {
                c.name == "code"
                    && c.span.start >= pre.inner.start
                    && c.span.end <= pre.inner.end
            })
            .map(|c| text_content(&snapshot[c.inner.clone()]))
            .unwrap_or_default();

        records.push(CodeBlockRecord {
            span: pre.span.clone(),
            language,
            code,
        });
    }

    records.sort_by_key(|r| r.span.start);
    records
}

/// Read `data-language` off a `<pre ...>` open token. None means this pre
/// is not a code block record; an empty value falls back to "text".
fn language_of(open_token: &str) -> Option<SmolStr> {
    let (event, _) = FragmentParser::new(open_token).next()?;
    let tag = match event {
        FragmentEvent::Start(tag) | FragmentEvent::Void(tag) => tag,
        FragmentEvent::Text(_) | FragmentEvent::End(_) => return None,
    };
    let raw = tag.attr("data-language")?;
    if raw.is_empty() {
        Some(SmolStr::new_static("text"))
    } else {
        Some(SmolStr::new(raw))
    }
}

/// Concatenated, entity-decoded text of a fragment (DOM `textContent`).
fn text_content(inner: &str) -> String {
    let mut out = String::new();
    for (event, _) in FragmentParser::new(inner) {
        if let FragmentEvent::Text(text) = event {
            out.push_str(&unescape(text));
        }
    }
    out
}

fn render_widget(record: &CodeBlockRecord) -> String {
    let mut b = FragmentBuilder::new();
    b.start("div")
        .attr("class", "code-block-container")
        .start("div")
        .attr("class", "code-block-header")
        .start("span")
        .attr("class", "code-block-language")
        .text(&record.language)
        .end()
        .start("button")
        .attr("class", "copy-btn")
        .attr("data-code", &encode_copy_payload(&record.code))
        .attr("title", "Copy code")
        .raw(COPY_ICON)
        .end()
        .end()
        .start("pre")
        .attr("class", "code-block-body")
        .start("code")
        .attr("class", &format!("language-{}", record.language));
    match highlighted_body(&record.language, &record.code) {
        Some(html) => b.raw(&html),
        None => b.text(&record.code),
    };
    b.end().end().end();
    b.finish()
}

#[cfg(feature = "syntax-highlighting")]
fn highlighted_body(language: &str, code: &str) -> Option<String> {
    crate::highlight::highlight(language, code)
}

#[cfg(not(feature = "syntax-highlighting"))]
fn highlighted_body(_language: &str, _code: &str) -> Option<String> {
    None
}
