//! Entity escaping and the copy-payload percent encoding.
//!
//! All helpers return `Cow::Borrowed` when the input needs no rewriting,
//! which is the common case for editor content.

use std::borrow::Cow;

use thiserror::Error;

/// Escape text for element body position (`&`, `<`, `>`).
pub fn escape_html(s: &str) -> Cow<'_, str> {
    escape_with(s, |c| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        _ => None,
    })
}

/// Escape text for a double-quoted attribute value (`&`, `<`, `>`, `"`, `'`).
pub fn escape_attribute(s: &str) -> Cow<'_, str> {
    escape_with(s, |c| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    })
}

fn escape_with(s: &str, entity: impl Fn(char) -> Option<&'static str>) -> Cow<'_, str> {
    let Some(first) = s.find(|c| entity(c).is_some()) else {
        return Cow::Borrowed(s);
    };

    let mut out = String::with_capacity(s.len() + 8);
    out.push_str(&s[..first]);
    for c in s[first..].chars() {
        match entity(c) {
            Some(e) => out.push_str(e),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Decode the entities the escape helpers produce, plus the common
/// apostrophe spellings. Unknown entities are left untouched.
pub fn unescape(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        let mut matched = None;
        for (entity, ch) in [
            ("&amp;", '&'),
            ("&lt;", '<'),
            ("&gt;", '>'),
            ("&quot;", '"'),
            ("&#39;", '\''),
            ("&#x27;", '\''),
            ("&apos;", '\''),
        ] {
            if rest.starts_with(entity) {
                matched = Some((entity.len(), ch));
                break;
            }
        }

        match matched {
            Some((len, ch)) => {
                out.push(ch);
                rest = &rest[len..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Error decoding a copy payload.
#[derive(Debug, Error, miette::Diagnostic, PartialEq, Eq)]
pub enum PayloadError {
    #[error("truncated percent escape at byte {offset}")]
    #[diagnostic(code(inkstone::markup::payload))]
    TruncatedEscape { offset: usize },
    #[error("invalid hex digits in percent escape at byte {offset}")]
    #[diagnostic(code(inkstone::markup::payload))]
    InvalidHex { offset: usize },
    #[error("decoded payload is not valid UTF-8")]
    #[diagnostic(code(inkstone::markup::payload))]
    InvalidUtf8,
}

// The unreserved set of encodeURIComponent; everything else is
// percent-encoded byte-wise. Payloads written by a browser-side
// encodeURIComponent decode identically.
fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')')
}

/// Encode verbatim code text for transport inside an attribute value.
pub fn encode_copy_payload(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for &b in s.as_bytes() {
        if is_unreserved(b) {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

/// Decode a copy payload back to the exact original text.
pub fn decode_copy_payload(s: &str) -> Result<String, PayloadError> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 3 > bytes.len() {
                return Err(PayloadError::TruncatedEscape { offset: i });
            }
            let hex = s
                .get(i + 1..i + 3)
                .ok_or(PayloadError::InvalidHex { offset: i })?;
            let value = u8::from_str_radix(hex, 16)
                .map_err(|_| PayloadError::InvalidHex { offset: i })?;
            out.push(value);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).map_err(|_| PayloadError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_borrows_when_clean() {
        assert!(matches!(escape_html("plain text"), Cow::Borrowed(_)));
        assert!(matches!(escape_attribute("rust"), Cow::Borrowed(_)));
    }

    #[test]
    fn escape_and_unescape_round_trip() {
        let input = r#"if a < b && c > "d" { 'e' }"#;
        let escaped = escape_attribute(input);
        assert!(!escaped.contains('"'));
        assert!(!escaped.contains('<'));
        assert_eq!(unescape(&escaped), input);
    }

    #[test]
    fn unescape_leaves_unknown_entities() {
        assert_eq!(unescape("&nbsp;&amp;"), "&nbsp;&");
    }

    #[test]
    fn copy_payload_round_trips_awkward_text() {
        for input in [
            "print(1)",
            "a % b %% c",
            r#"say("hi & bye")"#,
            "emoji ☃ and\nnewlines\ttabs",
            "100% done",
        ] {
            let encoded = encode_copy_payload(input);
            // Payload must be attribute-safe as-is.
            assert!(!encoded.contains('"'));
            assert!(!encoded.contains('&'));
            assert!(!encoded.contains('<'));
            assert_eq!(decode_copy_payload(&encoded).unwrap(), input);
        }
    }

    #[test]
    fn decode_rejects_malformed_escapes() {
        assert_eq!(
            decode_copy_payload("abc%2"),
            Err(PayloadError::TruncatedEscape { offset: 3 })
        );
        assert_eq!(
            decode_copy_payload("%zz"),
            Err(PayloadError::InvalidHex { offset: 0 })
        );
        assert_eq!(decode_copy_payload("%FF"), Err(PayloadError::InvalidUtf8));
    }
}
