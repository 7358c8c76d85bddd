//! Pull parser for markup fragments.
//!
//! Yields `(FragmentEvent, byte_range)` pairs so callers can splice the
//! source string around individual tokens. A `<` that does not begin a
//! recognizable tag is emitted as text, mirroring browser recovery, so the
//! parser itself never fails; structural problems are reported by
//! [`crate::validate_fragment`].

use std::ops::Range;

use smol_str::SmolStr;

use crate::escape::unescape;
use crate::event::{Attribute, FragmentEvent, FragmentTag, is_void_tag};

/// Iterator over the events of a fragment.
pub struct FragmentParser<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> FragmentParser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    /// The full source this parser reads from.
    pub fn source(&self) -> &'a str {
        self.source
    }

    fn bytes(&self) -> &'a [u8] {
        self.source.as_bytes()
    }

    /// Parse a tag starting at `self.pos` (which points at `<`).
    /// Returns the event and the end position, or None if the input is not
    /// a well-formed tag token.
    fn parse_tag(&self) -> Option<(FragmentEvent<'a>, usize)> {
        let bytes = self.bytes();
        let mut i = self.pos + 1;

        let closing = if bytes.get(i) == Some(&b'/') {
            i += 1;
            true
        } else {
            false
        };

        let name_start = i;
        if !bytes.get(i)?.is_ascii_alphabetic() {
            return None;
        }
        while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'-') {
            i += 1;
        }
        let name = SmolStr::new(self.source[name_start..i].to_ascii_lowercase());

        if closing {
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if bytes.get(i) != Some(&b'>') {
                return None;
            }
            return Some((FragmentEvent::End(name), i + 1));
        }

        let mut attrs = Vec::new();
        let mut self_closing = false;
        loop {
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            match bytes.get(i) {
                None => return None,
                Some(b'>') => {
                    i += 1;
                    break;
                }
                Some(b'/') => {
                    if bytes.get(i + 1) == Some(&b'>') {
                        self_closing = true;
                        i += 2;
                        break;
                    }
                    return None;
                }
                Some(_) => {
                    let (attr, next) = self.parse_attribute(i)?;
                    attrs.push(attr);
                    i = next;
                }
            }
        }

        let tag = FragmentTag { name, attrs };
        let event = if self_closing || is_void_tag(&tag.name) {
            FragmentEvent::Void(tag)
        } else {
            FragmentEvent::Start(tag)
        };
        Some((event, i))
    }

    fn parse_attribute(&self, start: usize) -> Option<(Attribute, usize)> {
        let bytes = self.bytes();
        let mut i = start;

        let name_start = i;
        while i < bytes.len()
            && !bytes[i].is_ascii_whitespace()
            && !matches!(bytes[i], b'=' | b'>' | b'/')
        {
            i += 1;
        }
        if i == name_start {
            return None;
        }
        let name = SmolStr::new(self.source[name_start..i].to_ascii_lowercase());

        if bytes.get(i) != Some(&b'=') {
            return Some((
                Attribute {
                    name,
                    value: String::new(),
                },
                i,
            ));
        }
        i += 1;

        let value = match bytes.get(i).copied() {
            Some(quote @ (b'"' | b'\'')) => {
                i += 1;
                let value_start = i;
                while i < bytes.len() && bytes[i] != quote {
                    i += 1;
                }
                if i >= bytes.len() {
                    return None;
                }
                let raw = &self.source[value_start..i];
                i += 1;
                unescape(raw).into_owned()
            }
            _ => {
                let value_start = i;
                while i < bytes.len()
                    && !bytes[i].is_ascii_whitespace()
                    && !matches!(bytes[i], b'>' | b'/')
                {
                    i += 1;
                }
                unescape(&self.source[value_start..i]).into_owned()
            }
        };

        Some((Attribute { name, value }, i))
    }
}

impl<'a> Iterator for FragmentParser<'a> {
    type Item = (FragmentEvent<'a>, Range<usize>);

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.bytes();
        if self.pos >= bytes.len() {
            return None;
        }

        let start = self.pos;
        if bytes[start] == b'<' {
            if let Some((event, end)) = self.parse_tag() {
                self.pos = end;
                return Some((event, start..end));
            }
            // Not a tag: emit the `<` itself as text.
            self.pos = start + 1;
            return Some((FragmentEvent::Text(&self.source[start..start + 1]), start..start + 1));
        }

        let end = self.source[start..]
            .find('<')
            .map(|off| start + off)
            .unwrap_or(bytes.len());
        self.pos = end;
        Some((FragmentEvent::Text(&self.source[start..end]), start..end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(src: &str) -> Vec<FragmentEvent<'_>> {
        FragmentParser::new(src).map(|(e, _)| e).collect()
    }

    #[test]
    fn parses_simple_paragraph() {
        let evs = events("<p>hello</p>");
        assert_eq!(evs.len(), 3);
        match &evs[0] {
            FragmentEvent::Start(tag) => assert_eq!(tag.name, "p"),
            other => panic!("expected start tag, got {other:?}"),
        }
        assert_eq!(evs[1], FragmentEvent::Text("hello"));
        assert_eq!(evs[2], FragmentEvent::End(SmolStr::new("p")));
    }

    #[test]
    fn spans_cover_the_source_exactly() {
        let src = r#"<p>a <strong>b</strong></p><img src="x" />"#;
        let mut expected = 0;
        for (_, span) in FragmentParser::new(src) {
            assert_eq!(span.start, expected);
            expected = span.end;
        }
        assert_eq!(expected, src.len());
    }

    #[test]
    fn attributes_are_decoded() {
        let src = r#"<pre data-language="rust" data-note="a &quot;b&quot;">x</pre>"#;
        let evs = events(src);
        match &evs[0] {
            FragmentEvent::Start(tag) => {
                assert_eq!(tag.attr("data-language"), Some("rust"));
                assert_eq!(tag.attr("data-note"), Some(r#"a "b""#));
            }
            other => panic!("expected start tag, got {other:?}"),
        }
    }

    #[test]
    fn void_elements_with_and_without_slash() {
        let evs = events("<br><hr />");
        assert!(matches!(&evs[0], FragmentEvent::Void(t) if t.name == "br"));
        assert!(matches!(&evs[1], FragmentEvent::Void(t) if t.name == "hr"));
    }

    #[test]
    fn bare_angle_bracket_degrades_to_text() {
        let evs = events("a < b");
        assert_eq!(
            evs,
            vec![
                FragmentEvent::Text("a "),
                FragmentEvent::Text("<"),
                FragmentEvent::Text(" b"),
            ]
        );
    }

    #[test]
    fn valueless_and_bareword_attributes() {
        let evs = events(r#"<input disabled type=checkbox />"#);
        match &evs[0] {
            FragmentEvent::Void(tag) => {
                assert_eq!(tag.attr("disabled"), Some(""));
                assert_eq!(tag.attr("type"), Some("checkbox"));
            }
            other => panic!("expected void tag, got {other:?}"),
        }
    }
}
