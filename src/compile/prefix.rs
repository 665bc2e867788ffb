//! Vendor prefixing with `lightningcss`.
//!
//! The stylesheet itself is never reprinted. Each declaration is run through
//! `lightningcss` on its own, and the vendor-prefixed declarations it emits
//! for the configured browsers are inserted in front of the original one.
//! Comments, rule order, declaration order and values are kept as written,
//! and declarations `lightningcss` cannot parse (legacy hacks such as
//! `*zoom: 1`) pass through untouched.

use anyhow::Result;
use lightningcss::rules::CssRule;
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::core::SkinError;
use crate::pipeline::{SourceFile, Transform};
use crate::utils::css::blank_code;

static VENDOR_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[\s:,(])-(?:webkit|moz|ms|o)-").expect("vendor prefix pattern is valid")
});

/// A declaration inside a block without nested blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DeclarationSpan {
    /// Offset of the previous `{` or `;`, plus one
    segment_start: usize,
    start: usize,
    end: usize,
}

/// Adds the vendor prefixes needed by the configured browsers.
#[derive(Debug, Clone, Copy)]
pub struct Autoprefixer {
    targets: Targets,
}

impl Autoprefixer {
    /// Builds a prefixer from browserslist queries such as `defaults` or
    /// `last 2 versions`.
    pub fn new(queries: &[String]) -> Result<Self> {
        let browsers = Browsers::from_browserslist(queries.iter().map(String::as_str)).map_err(
            |e| SkinError::ConfigError {
                message: format!("invalid browser queries {queries:?}: {e}"),
            },
        )?;

        tracing::debug!("Prefixing for {queries:?} -> {browsers:?}");
        Ok(Self {
            targets: Targets {
                browsers,
                ..Targets::default()
            },
        })
    }

    /// Returns `css` with prefixed declarations added.
    pub fn process(&self, css: &str, filename: &str) -> Result<String> {
        let code = blank_code(css);
        let mut cache: HashMap<&str, Vec<String>> = HashMap::new();
        let mut insertions: Vec<(usize, String)> = Vec::new();

        for block in declaration_blocks(&code) {
            let mut present: HashSet<String> =
                block.iter().map(|span| normalized(&css[span.start..span.end])).collect();

            for span in block {
                let declaration = &css[span.start..span.end];
                if VENDOR_PREFIX.is_match(declaration) {
                    continue;
                }

                if !cache.contains_key(declaration) {
                    let variants = self.prefixed(declaration, filename)?;
                    cache.insert(declaration, variants);
                }
                let Some(variants) = cache.get(declaration) else {
                    continue;
                };

                let separator = separator(&css[span.segment_start..span.start]);
                for variant in variants {
                    if present.insert(normalized(variant)) {
                        insertions.push((span.start, format!("{variant};{separator}")));
                    }
                }
            }
        }

        if insertions.is_empty() {
            return Ok(css.to_string());
        }
        insertions.sort_by_key(|(offset, _)| *offset);
        tracing::trace!("Adding {} prefixed declaration(s) to {filename}", insertions.len());

        let added: usize = insertions.iter().map(|(_, text)| text.len()).sum();
        let mut out = String::with_capacity(css.len() + added);
        let mut last = 0;
        for (offset, text) in insertions {
            out.push_str(&css[last..offset]);
            out.push_str(&text);
            last = offset;
        }
        out.push_str(&css[last..]);
        Ok(out)
    }

    /// The vendor-prefixed declarations `lightningcss` emits for
    /// `declaration`, in its output order.
    fn prefixed(&self, declaration: &str, filename: &str) -> Result<Vec<String>> {
        let css_error = |reason: String| SkinError::CssError {
            file: filename.to_string(),
            reason,
        };

        let rule = format!(".x{{{declaration}}}");
        let mut sheet = StyleSheet::parse(
            &rule,
            ParserOptions {
                filename: filename.to_string(),
                error_recovery: true,
                ..ParserOptions::default()
            },
        )
        .map_err(|e| css_error(e.to_string()))?;

        sheet
            .minify(MinifyOptions {
                targets: self.targets,
                ..MinifyOptions::default()
            })
            .map_err(|e| css_error(e.to_string()))?;

        let mut variants = Vec::new();
        for rule in &sheet.rules.0 {
            let CssRule::Style(style) = rule else {
                continue;
            };
            let block = &style.declarations;
            let properties = block
                .declarations
                .iter()
                .map(|p| (p, false))
                .chain(block.important_declarations.iter().map(|p| (p, true)));

            for (property, important) in properties {
                let printed = property
                    .to_css_string(important, PrinterOptions::default())
                    .map_err(|e| css_error(e.to_string()))?;
                if VENDOR_PREFIX.is_match(&printed) {
                    variants.push(printed);
                }
            }
        }
        Ok(variants)
    }
}

/// Declarations of every innermost block, grouped per block.
///
/// Runs on masked text, so `;` and braces inside comments and strings are
/// already gone.
fn declaration_blocks(code: &str) -> Vec<Vec<DeclarationSpan>> {
    struct Frame {
        nested: bool,
        declarations: Vec<DeclarationSpan>,
    }

    let mut stack: Vec<Frame> = Vec::new();
    let mut blocks = Vec::new();
    let mut segment_start = 0;
    let mut parens = 0usize;

    let push_segment = |stack: &mut Vec<Frame>, start: usize, end: usize| {
        let Some(frame) = stack.last_mut() else {
            return;
        };
        let segment = &code[start..end];
        let trimmed = segment.trim_start();
        let body = trimmed.trim_end();
        if body.is_empty() || body.starts_with('@') || !body.contains(':') {
            return;
        }
        let decl_start = start + (segment.len() - trimmed.len());
        frame.declarations.push(DeclarationSpan {
            segment_start: start,
            start: decl_start,
            end: decl_start + body.len(),
        });
    };

    for (i, b) in code.bytes().enumerate() {
        match b {
            b'(' => parens += 1,
            b')' => parens = parens.saturating_sub(1),
            b';' if parens == 0 => {
                push_segment(&mut stack, segment_start, i);
                segment_start = i + 1;
            }
            b'{' if parens == 0 => {
                if let Some(parent) = stack.last_mut() {
                    parent.nested = true;
                }
                stack.push(Frame {
                    nested: false,
                    declarations: Vec::new(),
                });
                segment_start = i + 1;
            }
            b'}' if parens == 0 => {
                push_segment(&mut stack, segment_start, i);
                if let Some(frame) = stack.pop() {
                    if !frame.nested && !frame.declarations.is_empty() {
                        blocks.push(frame.declarations);
                    }
                }
                segment_start = i + 1;
            }
            _ => {}
        }
    }

    blocks
}

/// Whitespace to put between an inserted declaration and the original.
fn separator(gap: &str) -> String {
    match gap.rfind('\n') {
        Some(pos) => {
            let indent: String = gap[pos + 1..].chars().take_while(|c| c.is_whitespace()).collect();
            format!("\n{indent}")
        }
        None if gap.is_empty() => String::new(),
        None => " ".to_string(),
    }
}

fn normalized(declaration: &str) -> String {
    declaration.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_ascii_lowercase()
}

impl Transform for Autoprefixer {
    fn name(&self) -> &'static str {
        "autoprefixer"
    }

    fn apply(&self, mut file: SourceFile) -> Result<SourceFile> {
        file.contents = self.process(&file.contents, &file.path().display().to_string())?;
        Ok(file)
    }
}
