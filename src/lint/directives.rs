//! Inline `stylelint-disable` / `stylelint-enable` comments.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use super::rules::Comment;
use super::source_map::LineIndex;

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A\s*(stylelint-(?:disable|enable)(?:-line|-next-line)?)(?:\s+(.*?))?\s*\z")
        .expect("directive pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Disable,
    Enable,
    DisableLine,
    DisableNextLine,
}

/// `None` means every rule.
type RuleList = Option<Vec<String>>;

#[derive(Debug, Clone)]
struct Directive {
    kind: Kind,
    rules: RuleList,
    offset: usize,
    line: usize,
}

/// The disabled regions of one source.
#[derive(Debug, Clone, Default)]
pub struct DisabledRanges {
    directives: Vec<Directive>,
}

fn parse_rules(text: Option<&str>) -> RuleList {
    // `-- description` trails the rule list
    let text = text?.split("--").next()?.trim();
    if text.is_empty() {
        return None;
    }
    let rules: Vec<String> =
        text.split(',').map(str::trim).filter(|r| !r.is_empty()).map(String::from).collect();
    (!rules.is_empty()).then_some(rules)
}

fn covers(rules: &RuleList, rule: &str) -> bool {
    match rules {
        None => true,
        Some(list) => list.iter().any(|r| r == rule),
    }
}

impl DisabledRanges {
    /// Collects the directives found in `comments`.
    pub fn from_comments(comments: &[Comment], lines: &LineIndex) -> Self {
        let directives = comments
            .iter()
            .filter_map(|comment| {
                let caps = DIRECTIVE.captures(&comment.body)?;
                let kind = match &caps[1] {
                    "stylelint-disable" => Kind::Disable,
                    "stylelint-enable" => Kind::Enable,
                    "stylelint-disable-line" => Kind::DisableLine,
                    "stylelint-disable-next-line" => Kind::DisableNextLine,
                    _ => return None,
                };
                Some(Directive {
                    kind,
                    rules: parse_rules(caps.get(2).map(|m| m.as_str())),
                    offset: comment.start,
                    line: lines.position(comment.start).0,
                })
            })
            .collect();

        Self {
            directives,
        }
    }

    /// Whether a finding of `rule` at `offset` (on `line`) is disabled.
    pub fn is_disabled(&self, rule: &str, offset: usize, line: usize) -> bool {
        let mut all = false;
        let mut disabled: HashSet<&str> = HashSet::new();
        let mut exceptions: HashSet<&str> = HashSet::new();

        for directive in &self.directives {
            match directive.kind {
                Kind::DisableLine if directive.line == line && covers(&directive.rules, rule) => {
                    return true;
                }
                Kind::DisableNextLine
                    if directive.line + 1 == line && covers(&directive.rules, rule) =>
                {
                    return true;
                }
                Kind::Disable if directive.offset < offset => match &directive.rules {
                    None => {
                        all = true;
                        disabled.clear();
                        exceptions.clear();
                    }
                    Some(list) => {
                        for r in list {
                            if all {
                                exceptions.remove(r.as_str());
                            } else {
                                disabled.insert(r.as_str());
                            }
                        }
                    }
                },
                Kind::Enable if directive.offset < offset => match &directive.rules {
                    None => {
                        all = false;
                        disabled.clear();
                        exceptions.clear();
                    }
                    Some(list) => {
                        for r in list {
                            if all {
                                exceptions.insert(r.as_str());
                            } else {
                                disabled.remove(r.as_str());
                            }
                        }
                    }
                },
                _ => {}
            }
        }

        (all && !exceptions.contains(rule)) || disabled.contains(rule)
    }
}
