//! Brand rewriting over flat field maps and nested documents.
//!
//! A [`BrandRewriter`] pairs a [`BrandMatcher`] with the canonical spelling
//! every match is replaced by. It offers two passes:
//!
//! - [`BrandRewriter::rewrite_fields`] touches the top-level string fields of
//!   one object and nothing else.
//! - [`BrandRewriter::sweep`] walks the whole document tree.
//!
//! Both only ever replace string leaves. Keys, array lengths and non-string
//! leaves are left exactly as they were.

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::config::RewriteConfig;
use crate::pattern::BrandMatcher;

/// Replaces one brand source with its canonical form.
#[derive(Debug, Clone)]
pub struct BrandRewriter {
    matcher: BrandMatcher,
    canonical: String,
    keep_suffix: bool,
}

impl BrandRewriter {
    /// Builds a rewriter that finds `source` and writes `canonical`.
    ///
    /// Returns `None` when `source` is blank.
    ///
    /// ```rust
    /// use canonical::{BrandRewriter, RewriteConfig};
    ///
    /// let rewriter = BrandRewriter::new("nike", "Nike", &RewriteConfig::default()).unwrap();
    /// let (text, replaced) = rewriter.rewrite_text("NIKE shoes and nike's bag");
    /// assert_eq!(text, "Nike shoes and Nike's bag");
    /// assert_eq!(replaced, 2);
    /// ```
    pub fn new(source: &str, canonical: &str, cfg: &RewriteConfig) -> Option<Self> {
        BrandMatcher::new(source).map(|matcher| Self {
            matcher,
            canonical: canonical.to_string(),
            keep_suffix: cfg.keep_suffix,
        })
    }

    pub fn matcher(&self) -> &BrandMatcher {
        &self.matcher
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Rewrites every match in `text`, returning the new text and the number
    /// of replacements. Text without matches is returned borrowed.
    pub fn rewrite_text<'t>(&self, text: &'t str) -> (Cow<'t, str>, usize) {
        let matches = self.matcher.find_all(text);
        if matches.is_empty() {
            return (Cow::Borrowed(text), 0);
        }

        let mut out = String::with_capacity(text.len() + matches.len() * self.canonical.len());
        let mut last = 0;
        for m in &matches {
            out.push_str(&text[last..m.start]);
            out.push_str(&self.canonical);
            if self.keep_suffix {
                push_suffix(&mut out, m.suffix(text));
            }
            last = m.end;
        }
        out.push_str(&text[last..]);

        (Cow::Owned(out), matches.len())
    }

    /// Targeted pass: rewrites each non-empty string value of `fields`.
    ///
    /// Nested values are not visited; use [`sweep`](Self::sweep) for that.
    pub fn rewrite_fields(&self, fields: &mut Map<String, Value>) -> usize {
        fields
            .values_mut()
            .map(|value| match value {
                Value::String(text) if !text.is_empty() => self.rewrite_string(text),
                _ => 0,
            })
            .sum()
    }

    /// Deep pass: rewrites every string leaf of `value`, recursively.
    pub fn sweep(&self, value: &mut Value) -> usize {
        match value {
            Value::String(text) => self.rewrite_string(text),
            Value::Array(items) => items.iter_mut().map(|item| self.sweep(item)).sum(),
            Value::Object(fields) => fields.values_mut().map(|item| self.sweep(item)).sum(),
            Value::Null | Value::Bool(_) | Value::Number(_) => 0,
        }
    }

    fn rewrite_string(&self, text: &mut String) -> usize {
        let (rewritten, count) = self.rewrite_text(text);
        if let Cow::Owned(rewritten) = rewritten {
            *text = rewritten;
        }
        count
    }
}

/// Writes a kept suffix with its `s` lower-cased, so `"NIKE'S"` cannot leave
/// a mixed-case `"Nike'S"` behind. The possessive mark is written as matched.
fn push_suffix(out: &mut String, suffix: &str) {
    if let Some(mark) = suffix.strip_suffix(|ch: char| ch == 's' || ch == 'S') {
        out.push_str(mark);
        out.push('s');
    }
}
