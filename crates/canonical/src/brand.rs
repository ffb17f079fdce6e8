//! Canonical brand resolution.
//!
//! The caller's casing is trusted whenever it carries information: a brand
//! typed with any uppercase letter ("iPhone", "IKEA", "McLaren") is only
//! whitespace-normalized. A brand typed entirely without uppercase letters is
//! title-cased word by word. Nothing is ever lowercased.

use crate::whitespace::collapse_whitespace;

/// Resolves the single authoritative spelling of a brand.
///
/// "Uppercase" is Unicode `char::is_uppercase`, not just `A-Z`: a brand such
/// as `"ébay Élan"` is trusted as written rather than title-cased.
///
/// ```rust
/// use canonical::resolve_canonical_brand;
///
/// assert_eq!(resolve_canonical_brand("apple"), "Apple");
/// assert_eq!(resolve_canonical_brand("  IKEA "), "IKEA");
/// assert_eq!(resolve_canonical_brand("north   face"), "North Face");
/// assert_eq!(resolve_canonical_brand("   "), "");
/// ```
pub fn resolve_canonical_brand(raw: &str) -> String {
    let cleaned = collapse_whitespace(raw);
    if cleaned.is_empty() || cleaned.chars().any(char::is_uppercase) {
        return cleaned;
    }
    title_case_words(&cleaned)
}

/// Uppercases the first character of every space-separated word and leaves
/// the rest of each word as written.
///
/// Expects whitespace that is already collapsed to single spaces.
fn title_case_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    for (idx, word) in text.split(' ').enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
