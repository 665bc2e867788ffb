//! `@import` statement normalization.

use anyhow::Result;
use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::pipeline::{SourceFile, Transform};
use crate::utils::css::blank_code;

/// Any `@import` form: quoted string, quoted `url()` or bare `url()`.
static IMPORT_STATEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)@import\s*(?:url\(\s*(?:"([^"]*)"|'([^']*)'|([^)\s]*))\s*\)|"([^"]*)"|'([^']*)')\s*([^;{}]*?)\s*;"#,
    )
    .expect("import statement pattern is valid")
});

/// Rewrites every `@import` to `@import "<path>"[ <media>];` on its own line.
///
/// Statements are matched on the masked text, so imports inside comments
/// and strings are left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportBeautifier;

impl ImportBeautifier {
    /// Normalizes the imports of `text`.
    pub fn beautify(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        let code = blank_code(text);

        for caps in IMPORT_STATEMENT.captures_iter(&code) {
            let Some(whole) = caps.get(0) else {
                continue;
            };

            out.push_str(&text[last..whole.start()]);
            if !out.is_empty() && !line_is_blank_before(&out) {
                out.push('\n');
            }
            out.push_str(&normalized(text, &caps));

            let rest = &text[whole.end()..];
            let line_rest = rest.split('\n').next().unwrap_or_default();
            if !line_rest.trim().is_empty() {
                out.push('\n');
            }
            last = whole.end();
        }

        out.push_str(&text[last..]);
        out
    }
}

fn line_is_blank_before(out: &str) -> bool {
    out.rsplit('\n').next().is_none_or(|line| line.trim().is_empty())
}

/// Slices the captured spans of the masked match from the original text.
fn normalized(text: &str, caps: &Captures<'_>) -> String {
    let path = (1..=5).find_map(|i| caps.get(i)).map_or("", |m| &text[m.range()]).trim();
    let media = caps.get(6).map_or("", |m| &text[m.range()]).trim();
    if media.is_empty() {
        format!("@import \"{path}\";")
    } else {
        format!("@import \"{path}\" {media};")
    }
}

impl Transform for ImportBeautifier {
    fn name(&self) -> &'static str {
        "import-beautifier"
    }

    fn apply(&self, mut file: SourceFile) -> Result<SourceFile> {
        file.contents = Self::beautify(&file.contents);
        Ok(file)
    }
}
