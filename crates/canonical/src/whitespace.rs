//! Whitespace normalization utilities.
//!
//! Everything downstream (brand resolution, pattern building, the fallback
//! narrative) compares text in this collapsed form, so the helpers here are
//! the single definition of "normalized spacing" for the crate.
//!
//! # Whitespace Definition
//!
//! Unicode `White_Space` is used, which covers ASCII space, tab, newline and
//! carriage return as well as non-breaking and other Unicode spaces.
//!
//! # Examples
//!
//! ```rust
//! use canonical::collapse_whitespace;
//!
//! let normalized = collapse_whitespace("  hello   world  ");
//! assert_eq!(normalized, "hello world");
//! ```

use std::borrow::Cow;

use serde_json::Value;

/// Collapses repeated whitespace, trims edges, and turns newlines into
/// single spaces.
///
/// # Algorithm
///
/// 1. Split the text on any Unicode whitespace (using `split_whitespace()`)
/// 2. Join the resulting segments with single ASCII spaces
/// 3. The result has no leading or trailing whitespace
///
/// # Examples
///
/// ```rust
/// use canonical::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("hello\t\t\tworld"), "hello world");
/// assert_eq!(collapse_whitespace("hello\r\nworld"), "hello world");
/// assert_eq!(collapse_whitespace("   \n\t   "), "");
/// assert_eq!(collapse_whitespace("hello\u{00A0}world"), "hello world");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}

/// Collapses whitespace in a document value after coercing it to text.
///
/// Strings are used as-is, numbers and booleans use their JSON display form,
/// and absent, null, array or object values become the empty string.
///
/// ```rust
/// use canonical::collapse_value;
/// use serde_json::json;
///
/// assert_eq!(collapse_value(Some(&json!("  Air   Max "))), "Air Max");
/// assert_eq!(collapse_value(Some(&json!(42))), "42");
/// assert_eq!(collapse_value(None), "");
/// ```
pub fn collapse_value(value: Option<&Value>) -> String {
    collapse_whitespace(&value_text(value))
}

/// Coerces a document value to text without touching its spacing.
pub(crate) fn value_text(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        Some(Value::String(text)) => Cow::Borrowed(text.as_str()),
        Some(Value::Number(number)) => Cow::Owned(number.to_string()),
        Some(Value::Bool(flag)) => Cow::Owned(flag.to_string()),
        Some(Value::Null | Value::Array(_) | Value::Object(_)) | None => Cow::Borrowed(""),
    }
}
