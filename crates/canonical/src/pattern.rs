//! Boundary-safe brand matching.
//!
//! A [`BrandMatcher`] recognizes one brand phrase inside free text:
//!
//! - case-insensitively, at every occurrence, across lines;
//! - across irregular spacing between the words of a multi-word brand;
//! - with an optional trailing `'s`, `’s` or bare `s`;
//! - only when the characters on both sides are not alphanumeric (or are the
//!   edge of the text), so `"Art"` never fires inside `"Article"`.
//!
//! The `regex` crate has no look-around, so only the phrase is compiled. The
//! boundaries and the suffix are verified by the scanner in
//! [`BrandMatcher::find_all`]. A candidate rejected there resumes the search
//! one character after its start, which gives the same set of matches a
//! backtracking engine would report for
//! `(^|[^alnum])(phrase)('s|’s|s)?(?![alnum])`.

use regex::{Regex, RegexBuilder};

use crate::whitespace::collapse_whitespace;

/// Suffix marks accepted before a trailing `s`.
const POSSESSIVE_MARKS: [char; 2] = ['\'', '\u{2019}'];

/// One accepted occurrence of a brand phrase.
///
/// Offsets are byte offsets into the scanned text. `start..phrase_end` is the
/// brand itself, `phrase_end..end` is the suffix (possibly empty). The left
/// boundary character, if any, sits before `start` and is never part of the
/// match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrandMatch {
    pub start: usize,
    pub phrase_end: usize,
    pub end: usize,
}

impl BrandMatch {
    /// The suffix that followed the phrase (`""`, `"s"`, `"'s"` or `"’s"`).
    pub fn suffix<'t>(&self, text: &'t str) -> &'t str {
        &text[self.phrase_end..self.end]
    }
}

/// A compiled matcher bound to one source brand string.
///
/// Boundaries use Unicode `char::is_alphanumeric`, so accented letters count
/// as word characters: `"Art"` matches in neither `"Artéfact"` nor `"éArt"`.
#[derive(Debug, Clone)]
pub struct BrandMatcher {
    source: String,
    phrase: Regex,
}

impl BrandMatcher {
    /// Builds a matcher for `brand`.
    ///
    /// Returns `None` when the brand is empty after whitespace normalization;
    /// there is nothing to match in that case.
    ///
    /// ```rust
    /// use canonical::BrandMatcher;
    ///
    /// let matcher = BrandMatcher::new("Art").unwrap();
    /// assert!(!matcher.is_match("Article"));
    /// assert!(matcher.is_match("modern art, framed"));
    /// assert!(BrandMatcher::new("  ").is_none());
    /// ```
    pub fn new(brand: &str) -> Option<Self> {
        let source = collapse_whitespace(brand);
        if source.is_empty() {
            return None;
        }

        let pattern = source
            .split(' ')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(r"\s+");

        // Escaped input always compiles; the size limit is the only way out.
        let phrase = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .multi_line(true)
            .build()
            .ok()?;

        Some(Self { source, phrase })
    }

    /// The whitespace-normalized brand this matcher was built from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns `true` if the brand occurs anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        !self.find_all(text).is_empty()
    }

    /// Returns every non-overlapping occurrence, left to right.
    pub fn find_all(&self, text: &str) -> Vec<BrandMatch> {
        let mut found = Vec::new();
        // End of the last accepted match; a left boundary character before
        // this offset has already been consumed.
        let mut consumed = 0;
        let mut at = 0;

        while at <= text.len() {
            let Some(candidate) = self.phrase.find_at(text, at) else {
                break;
            };
            let start = candidate.start();

            if has_left_boundary(text, start, consumed) {
                if let Some(suffix_len) = accepted_suffix_len(&text[candidate.end()..]) {
                    let end = candidate.end() + suffix_len;
                    found.push(BrandMatch {
                        start,
                        phrase_end: candidate.end(),
                        end,
                    });
                    consumed = end;
                    at = end;
                    continue;
                }
            }

            at = next_char_boundary(text, start);
        }

        found
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric()
}

fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Start of text, start of a line, or one non-alphanumeric character that a
/// previous match has not already claimed.
fn has_left_boundary(text: &str, start: usize, consumed: usize) -> bool {
    match text[..start].chars().next_back() {
        None => true,
        Some(prev) if is_line_terminator(prev) => true,
        Some(prev) => !is_word_char(prev) && start - prev.len_utf8() >= consumed,
    }
}

/// Tries the suffixes longest-first and returns the length of the first one
/// followed by a right boundary.
fn accepted_suffix_len(rest: &str) -> Option<usize> {
    let mut candidates: Vec<usize> = Vec::with_capacity(3);

    if let Some(mark) = rest.chars().next().filter(|ch| POSSESSIVE_MARKS.contains(ch)) {
        if starts_with_s(&rest[mark.len_utf8()..]) {
            candidates.push(mark.len_utf8() + 1);
        }
    }
    if starts_with_s(rest) {
        candidates.push(1);
    }
    candidates.push(0);

    candidates
        .into_iter()
        .find(|&len| has_right_boundary(&rest[len..]))
}

fn starts_with_s(text: &str) -> bool {
    text.starts_with(|ch: char| ch == 's' || ch == 'S')
}

fn has_right_boundary(rest: &str) -> bool {
    rest.chars().next().is_none_or(|ch| !is_word_char(ch))
}

fn next_char_boundary(text: &str, from: usize) -> usize {
    text[from..]
        .chars()
        .next()
        .map_or(text.len() + 1, |ch| from + ch.len_utf8())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(matcher: &BrandMatcher, text: &str) -> Vec<String> {
        matcher
            .find_all(text)
            .iter()
            .map(|m| text[m.start..m.end].to_string())
            .collect()
    }

    #[test]
    fn word_boundaries_block_partial_words() {
        let matcher = BrandMatcher::new("Art").unwrap();
        assert_eq!(spans(&matcher, "Article about art supplies"), vec!["art"]);
        assert!(!matcher.is_match("smart"));
        assert!(!matcher.is_match("Art2"));
        assert!(matcher.is_match("(ART)"));
    }

    #[test]
    fn unicode_letters_count_as_word_characters() {
        let matcher = BrandMatcher::new("Art").unwrap();
        assert!(!matcher.is_match("Artéfact"));
        assert!(!matcher.is_match("éArt"));
    }

    #[test]
    fn possessive_and_plural_suffixes() {
        let matcher = BrandMatcher::new("Nike").unwrap();
        let text = "Nike's shoes, NIKE’S bag and two nikes.";
        let found = matcher.find_all(text);
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].suffix(text), "'s");
        assert_eq!(found[1].suffix(text), "’S");
        assert_eq!(found[2].suffix(text), "s");
    }

    #[test]
    fn suffix_backtracks_when_followed_by_a_letter() {
        let matcher = BrandMatcher::new("Nike").unwrap();
        let text = "Nike'sx";
        let found = matcher.find_all(text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].suffix(text), "");
        assert!(!matcher.is_match("Nikesx"));
    }

    #[test]
    fn multi_word_brands_span_irregular_spacing() {
        let matcher = BrandMatcher::new("north   face").unwrap();
        assert_eq!(matcher.source(), "north face");
        assert_eq!(
            spans(&matcher, "The North\n  Face jacket"),
            vec!["North\n  Face"]
        );
    }

    #[test]
    fn metacharacters_match_literally() {
        let matcher = BrandMatcher::new("C++ Gear").unwrap();
        assert_eq!(spans(&matcher, "New C++ Gear kit"), vec!["C++ Gear"]);
        assert!(!matcher.is_match("CCC Gear"));

        let dots = BrandMatcher::new("a.b").unwrap();
        assert!(!dots.is_match("axb"));
        assert!(dots.is_match("by a.b today"));

        let symbols = BrandMatcher::new("$(^)|").unwrap();
        assert!(symbols.is_match("price $(^)| now"));
    }

    #[test]
    fn single_character_brand_keeps_boundaries() {
        let matcher = BrandMatcher::new("x").unwrap();
        assert_eq!(spans(&matcher, "x box xylophone"), vec!["x"]);
    }

    #[test]
    fn adjacent_occurrences_share_no_boundary_character() {
        let matcher = BrandMatcher::new("Nike").unwrap();
        assert_eq!(spans(&matcher, "Nike Nike,Nike"), vec!["Nike", "Nike", "Nike"]);
    }

    #[test]
    fn consumed_boundary_is_not_reused() {
        // The trailing `+` of the first hit cannot double as the left boundary
        // of the second.
        let matcher = BrandMatcher::new("++").unwrap();
        assert_eq!(spans(&matcher, "++++"), vec!["++"]);
    }

    #[test]
    fn line_starts_are_boundaries() {
        let matcher = BrandMatcher::new("Nike").unwrap();
        assert_eq!(spans(&matcher, "one\nnike\r\nNIKE"), vec!["nike", "NIKE"]);
    }

    #[test]
    fn empty_brand_has_no_matcher() {
        assert!(BrandMatcher::new("").is_none());
        assert!(BrandMatcher::new(" \n ").is_none());
    }
}
