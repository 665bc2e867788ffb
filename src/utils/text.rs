//! Small text helpers shared by the banner and trim stages.

/// Removes the whitespace prefix shared by every non-blank line.
///
/// Blank lines are ignored when measuring the common indent and are emitted
/// empty.
///
/// # Examples
///
/// ```rust
/// use skinpack::utils::text::strip_indent;
///
/// assert_eq!(strip_indent("    /*!\n     * theme\n     */"), "/*!\n * theme\n */");
/// ```
#[must_use]
pub fn strip_indent(text: &str) -> String {
    let indent = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    if indent == 0 {
        return text.to_string();
    }

    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                // Every non-blank line has at least `indent` bytes of ASCII or
                // Unicode whitespace; slice on the char boundary of that prefix.
                let mut cut = 0;
                for (idx, ch) in line.char_indices() {
                    if idx >= indent || !ch.is_whitespace() {
                        break;
                    }
                    cut = idx + ch.len_utf8();
                }
                &line[cut..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_indent_common_prefix() {
        let text = "  a\n    b\n  c";
        assert_eq!(strip_indent(text), "a\n  b\nc");
    }

    #[test]
    fn test_strip_indent_ignores_blank_lines() {
        let text = "    a\n\n    b";
        assert_eq!(strip_indent(text), "a\n\nb");
    }

    #[test]
    fn test_strip_indent_no_indent() {
        assert_eq!(strip_indent("a\n  b"), "a\n  b");
        assert_eq!(strip_indent(""), "");
    }
}
