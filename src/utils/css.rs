//! Masking of CSS source text.
//!
//! Scanners that look for statements with regexes or byte walks run on a
//! masked copy of the stylesheet, so an `@import` or a `;` inside a comment
//! or a string is never mistaken for code. Masked text has the same length
//! as the original, so every offset found in it indexes the original too.

use std::ops::Range;

/// Replaces comment bytes with spaces (newlines kept).
///
/// Returns the masked text and the byte range of each comment body, the
/// text between `/*` and `*/`. An unterminated comment runs to the end.
pub fn blank_comments(text: &str) -> (String, Vec<Range<usize>>) {
    let bytes = text.as_bytes();
    let mut code = bytes.to_vec();
    let mut comments = Vec::new();
    let mut quote: Option<u8> = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == b'\\' {
                i += 2;
                continue;
            }
            if b == q || b == b'\n' {
                quote = None;
            }
            i += 1;
            continue;
        }

        if b == b'"' || b == b'\'' {
            quote = Some(b);
            i += 1;
            continue;
        }

        if b == b'/' && bytes.get(i + 1) == Some(&b'*') {
            let body_start = i + 2;
            let (body_end, end) = match text[body_start..].find("*/") {
                Some(pos) => (body_start + pos, body_start + pos + 2),
                None => (bytes.len(), bytes.len()),
            };
            comments.push(body_start..body_end);
            blank(&mut code[i..end]);
            i = end;
            continue;
        }

        i += 1;
    }

    (into_string(code), comments)
}

/// Blanks comments and the contents of quoted strings.
///
/// Quotes themselves are kept, so `@import "a.css"` masks to
/// `@import "     "` and the path can be sliced from the original text.
///
/// ```rust
/// use skinpack::utils::css::blank_code;
///
/// let text = "/* @import \"x\"; */ a { content: \";\" }";
/// let code = blank_code(text);
/// assert_eq!(code.len(), text.len());
/// assert!(!code.contains("@import"));
/// assert!(code.ends_with("a { content: \" \" }"));
/// ```
#[must_use]
pub fn blank_code(text: &str) -> String {
    let (code, _) = blank_comments(text);
    let mut bytes = code.into_bytes();
    let mut i = 0;

    while i < bytes.len() {
        let q = bytes[i];
        if q != b'"' && q != b'\'' {
            i += 1;
            continue;
        }

        let start = i + 1;
        let mut end = start;
        while end < bytes.len() && bytes[end] != q && bytes[end] != b'\n' {
            end += if bytes[end] == b'\\' { 2 } else { 1 };
        }
        let end = end.min(bytes.len());
        blank(&mut bytes[start..end]);
        i = end + 1;
    }

    into_string(bytes)
}

fn blank(bytes: &mut [u8]) {
    for byte in bytes {
        if *byte != b'\n' {
            *byte = b' ';
        }
    }
}

// Only ASCII spaces are written, always over whole characters.
fn into_string(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}
