#![forbid(unsafe_code)]

//! `{{ expression }}` detection in text nodes.
//!
//! The pattern is greedy and only the first match in a text node counts:
//! `"{{a}} and {{b}}"` yields the expression `a}} and {{b`.

use std::sync::OnceLock;

use regex_lite::Regex;

fn pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"\{\{(.*)\}\}").ok())
        .as_ref()
}

/// A matched interpolation: the trimmed expression plus the text around the
/// match, kept so that updates only replace the `{{ .. }}` span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interpolation {
    expression: String,
    before: String,
    after: String,
}

impl Interpolation {
    /// Find the first interpolation in `text`.
    #[must_use]
    pub fn find(text: &str) -> Option<Self> {
        let caps = pattern()?.captures(text)?;
        let whole = caps.get(0)?;
        let inner = caps.get(1)?;
        Some(Self {
            expression: inner.as_str().trim().to_string(),
            before: text[..whole.start()].to_string(),
            after: text[whole.end()..].to_string(),
        })
    }

    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The original text with the matched span replaced by `value`.
    #[must_use]
    pub fn render(&self, value: &str) -> String {
        let mut out = String::with_capacity(self.before.len() + value.len() + self.after.len());
        out.push_str(&self.before);
        out.push_str(value);
        out.push_str(&self.after);
        out
    }
}
