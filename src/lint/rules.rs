//! Built-in lint rules and the structural scan they run on.
//!
//! The scan does not build a full CSS syntax tree. It records comments, the
//! blocks delimited by `{`/`}` and the `property: value` declarations inside
//! each block, which is everything the built-in rules look at. Real syntax
//! errors are reported separately by the CSS parser.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::utils::css::blank_comments;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[0-9A-Za-z]+").expect("hex color pattern is valid"));

static URL_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)url\([^)]*\)").expect("url pattern is valid"));

/// A built-in rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rule {
    /// `block-no-empty`
    BlockNoEmpty,
    /// `color-no-invalid-hex`
    ColorNoInvalidHex,
    /// `comment-no-empty`
    CommentNoEmpty,
    /// `declaration-block-no-duplicate-properties`
    DeclarationBlockNoDuplicateProperties,
    /// `no-empty-source`
    NoEmptySource,
}

impl Rule {
    /// Every built-in rule.
    pub const ALL: [Rule; 5] = [
        Rule::BlockNoEmpty,
        Rule::ColorNoInvalidHex,
        Rule::CommentNoEmpty,
        Rule::DeclarationBlockNoDuplicateProperties,
        Rule::NoEmptySource,
    ];

    /// Rule name as used in configuration files and directives.
    pub fn name(self) -> &'static str {
        match self {
            Rule::BlockNoEmpty => "block-no-empty",
            Rule::ColorNoInvalidHex => "color-no-invalid-hex",
            Rule::CommentNoEmpty => "comment-no-empty",
            Rule::DeclarationBlockNoDuplicateProperties => {
                "declaration-block-no-duplicate-properties"
            }
            Rule::NoEmptySource => "no-empty-source",
        }
    }

    /// Looks a rule up by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.name() == name)
    }

    /// Runs the rule over a scanned source.
    pub fn check(self, source: &ScannedSource<'_>) -> Vec<Violation> {
        match self {
            Rule::BlockNoEmpty => block_no_empty(source),
            Rule::ColorNoInvalidHex => color_no_invalid_hex(source),
            Rule::CommentNoEmpty => comment_no_empty(source),
            Rule::DeclarationBlockNoDuplicateProperties => no_duplicate_properties(source),
            Rule::NoEmptySource => no_empty_source(source),
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A rule violation at a byte offset of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub rule: Rule,
    pub offset: usize,
    pub message: String,
}

/// A `/* … */` comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Offset of `/*`
    pub start: usize,
    /// Text between the delimiters
    pub body: String,
}

/// A `property: value` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    /// Offset of the property name
    pub offset: usize,
    /// Offset of the first byte after the colon
    pub value_offset: usize,
}

/// A `{ … }` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Offset of `{`
    pub open: usize,
    /// No declarations, statements or nested blocks
    pub empty: bool,
    pub declarations: Vec<Declaration>,
}

/// Comments, blocks and declarations of one stylesheet.
#[derive(Debug)]
pub struct ScannedSource<'a> {
    pub text: &'a str,
    pub comments: Vec<Comment>,
    pub blocks: Vec<Block>,
}

#[derive(Default)]
struct Frame {
    open: usize,
    has_content: bool,
    declarations: Vec<Declaration>,
}

impl<'a> ScannedSource<'a> {
    /// Scans `text`. Never fails; malformed input yields a partial scan.
    pub fn scan(text: &'a str) -> Self {
        let (code, ranges) = blank_comments(text);
        let comments = ranges
            .into_iter()
            .map(|body| Comment {
                start: body.start - 2,
                body: text[body].to_string(),
            })
            .collect();
        let bytes = code.as_bytes();

        let mut stack: Vec<Frame> = Vec::new();
        let mut blocks = Vec::new();
        let mut segment_start = 0;
        let mut quote: Option<u8> = None;
        let mut escaped = false;
        let mut parens = 0usize;

        for (i, &b) in bytes.iter().enumerate() {
            if let Some(q) = quote {
                if escaped {
                    escaped = false;
                } else if b == b'\\' {
                    escaped = true;
                } else if b == q {
                    quote = None;
                }
                continue;
            }

            match b {
                b'"' | b'\'' => quote = Some(b),
                b'(' => parens += 1,
                b')' => parens = parens.saturating_sub(1),
                b';' if parens == 0 => {
                    push_segment(&code, segment_start, i, &mut stack);
                    segment_start = i + 1;
                }
                b'{' if parens == 0 => {
                    if let Some(parent) = stack.last_mut() {
                        parent.has_content = true;
                    }
                    stack.push(Frame {
                        open: i,
                        ..Frame::default()
                    });
                    segment_start = i + 1;
                }
                b'}' if parens == 0 => {
                    push_segment(&code, segment_start, i, &mut stack);
                    if let Some(frame) = stack.pop() {
                        blocks.push(Block {
                            open: frame.open,
                            empty: !frame.has_content,
                            declarations: frame.declarations,
                        });
                    }
                    segment_start = i + 1;
                }
                _ => {}
            }
        }

        blocks.sort_by_key(|block| block.open);

        Self {
            text,
            comments,
            blocks,
        }
    }
}

fn push_segment(code: &str, start: usize, end: usize, stack: &mut [Frame]) {
    let Some(frame) = stack.last_mut() else {
        return;
    };
    let segment = &code[start..end];
    let trimmed = segment.trim_start();
    if trimmed.trim_end().is_empty() {
        return;
    }
    frame.has_content = true;

    if trimmed.starts_with('@') {
        return;
    }
    let Some(colon) = trimmed.find(':') else {
        return;
    };

    let offset = start + (segment.len() - trimmed.len());
    frame.declarations.push(Declaration {
        property: trimmed[..colon].trim().to_string(),
        value: trimmed[colon + 1..].trim_end().to_string(),
        offset,
        value_offset: offset + colon + 1,
    });
}

fn block_no_empty(source: &ScannedSource<'_>) -> Vec<Violation> {
    source
        .blocks
        .iter()
        .filter(|block| block.empty)
        .map(|block| Violation {
            rule: Rule::BlockNoEmpty,
            offset: block.open,
            message: "Unexpected empty block".to_string(),
        })
        .collect()
}

fn comment_no_empty(source: &ScannedSource<'_>) -> Vec<Violation> {
    source
        .comments
        .iter()
        .filter(|comment| comment.body.trim().is_empty())
        .map(|comment| Violation {
            rule: Rule::CommentNoEmpty,
            offset: comment.start,
            message: "Unexpected empty comment".to_string(),
        })
        .collect()
}

fn no_duplicate_properties(source: &ScannedSource<'_>) -> Vec<Violation> {
    let mut violations = Vec::new();
    for block in &source.blocks {
        let mut seen = HashSet::new();
        for declaration in &block.declarations {
            let key = if declaration.property.starts_with("--") {
                declaration.property.clone()
            } else {
                declaration.property.to_ascii_lowercase()
            };
            if !seen.insert(key) {
                violations.push(Violation {
                    rule: Rule::DeclarationBlockNoDuplicateProperties,
                    offset: declaration.offset,
                    message: format!("Unexpected duplicate \"{}\"", declaration.property),
                });
            }
        }
    }
    violations
}

fn is_valid_hex(hex: &str) -> bool {
    matches!(hex.len(), 3 | 4 | 6 | 8) && hex.bytes().all(|b| b.is_ascii_hexdigit())
}

fn color_no_invalid_hex(source: &ScannedSource<'_>) -> Vec<Violation> {
    let mut violations = Vec::new();
    for declaration in source.blocks.iter().flat_map(|block| &block.declarations) {
        let value = URL_FUNCTION.replace_all(&declaration.value, |caps: &regex::Captures<'_>| {
            " ".repeat(caps[0].len())
        });

        for m in HEX_COLOR.find_iter(&value) {
            let preceded_by_word = value[..m.start()]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '&');
            if preceded_by_word || is_valid_hex(&m.as_str()[1..]) {
                continue;
            }
            violations.push(Violation {
                rule: Rule::ColorNoInvalidHex,
                offset: declaration.value_offset + m.start(),
                message: format!("Unexpected invalid hex color \"{}\"", m.as_str()),
            });
        }
    }
    violations
}

fn no_empty_source(source: &ScannedSource<'_>) -> Vec<Violation> {
    if source.text.trim().is_empty() {
        vec![Violation {
            rule: Rule::NoEmptySource,
            offset: 0,
            message: "Unexpected empty source".to_string(),
        }]
    } else {
        Vec::new()
    }
}
