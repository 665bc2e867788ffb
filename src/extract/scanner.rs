//! Tag region scanner.

use anyhow::{Context, Result};
use regex::Regex;
use std::sync::LazyLock;

static CDATA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A\s*<!\[CDATA\[(.*)\]\]>\s*\z").expect("CDATA pattern is valid")
});

/// Finds the text between start and end tags.
///
/// Tag names match ASCII case-insensitively and may be padded with
/// whitespace inside the angle brackets. Start tags may carry attributes.
#[derive(Debug, Clone)]
pub struct TagScanner {
    region: Regex,
}

impl TagScanner {
    /// Builds a scanner from a start token (`b:skin`) and an end token
    /// (`/b:skin`).
    pub fn new(start: &str, end: &str) -> Result<Self> {
        let start_name = regex::escape(start.trim());
        let end_token = end.trim();
        let end_name = regex::escape(end_token.strip_prefix('/').unwrap_or(end_token).trim());

        let pattern = format!(
            r"(?is)<\s*{start_name}(?:\s[^>]*)?>(.*?)<\s*/\s*{end_name}\s*>"
        );
        let region = Regex::new(&pattern)
            .with_context(|| format!("Invalid tag tokens '{start}' / '{end}'"))?;

        Ok(Self {
            region,
        })
    }

    /// Returns every region in document order.
    ///
    /// A region consisting of a single CDATA section is unwrapped.
    pub fn regions<'a>(&self, contents: &'a str) -> Vec<&'a str> {
        self.region
            .captures_iter(contents)
            .filter_map(|caps| caps.get(1))
            .map(|m| {
                let region = m.as_str();
                match CDATA.captures(region).and_then(|c| c.get(1)) {
                    Some(body) => body.as_str(),
                    None => region,
                }
            })
            .collect()
    }
}
