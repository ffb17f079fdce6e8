//! Brand canonicalization layer.
//!
//! Generated listings mention the product's brand in whatever casing the
//! generator felt like: "NIKE", "nike's", "Nikes". This crate rewrites every
//! such mention to one canonical spelling so the listing reads consistently.
//!
//! ## What we do
//!
//! - Whitespace normalization (collapses to single spaces)
//! - Canonical brand resolution (trust the caller's casing, title-case
//!   all-lowercase input)
//! - Boundary-safe, possessive-tolerant brand matching
//! - Rewriting of flat field maps and whole JSON trees
//! - Fallback assembly of the combined description
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no shared state. Same document, brand and config
//! give the same output on any machine, and running the rewrite again on its
//! own output changes nothing.
//!
//! ## Invariants worth knowing
//!
//! - An empty or blank brand is inert: no matcher is built, nothing changes
//! - Only string leaves are rewritten; keys, array lengths, numbers,
//!   booleans and nulls pass through untouched
//! - A match never starts or ends next to a letter or digit

mod brand;
mod config;
mod document;
mod narrative;
mod pattern;
mod pipeline;
mod rewrite;
mod whitespace;

pub use crate::brand::resolve_canonical_brand;
pub use crate::config::RewriteConfig;
pub use crate::document::{BrandReport, CanonicalListing};
pub use crate::narrative::{
    assemble_fallback_narrative, ensure_narrative, has_narrative, NARRATIVE_FIELD,
    PARAGRAPH_FIELDS,
};
pub use crate::pattern::{BrandMatch, BrandMatcher};
pub use crate::pipeline::{canonicalize, enforce_brand};
pub use crate::rewrite::BrandRewriter;
pub use crate::whitespace::{collapse_value, collapse_whitespace};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn generated_listing_end_to_end() {
        let generated = json!({
            "Title": "NIKE Air Zoom Running Shoes",
            "Subtitle": "Lightweight nike trainer",
            "seo_opening_paragraph": "These Nikes are built for distance.",
            "highlight_1": "nike’s responsive foam",
            "highlight_2": 42,
            "description_paragraph_1": "Classic Nike design.",
            "description_paragraph_2": "",
            "description_paragraph_3": "Ships fast from a NIKE-authorized seller."
        });

        let mut out = canonicalize(generated, "nike", &RewriteConfig::default());
        assert_eq!(out.canonical_brand, "Nike");

        let doc = &out.document;
        assert_eq!(doc["Title"], "Nike Air Zoom Running Shoes");
        assert_eq!(doc["Subtitle"], "Lightweight Nike trainer");
        assert_eq!(doc["seo_opening_paragraph"], "These Nikes are built for distance.");
        assert_eq!(doc["highlight_1"], "Nike’s responsive foam");
        assert_eq!(doc["highlight_2"], 42);
        assert_eq!(
            doc["description_paragraph_3"],
            "Ships fast from a Nike-authorized seller."
        );

        assert!(ensure_narrative(&mut out.document));
        assert_eq!(
            out.document[NARRATIVE_FIELD],
            "Classic Nike design.\n\nShips fast from a Nike-authorized seller."
        );
    }

    #[test]
    fn deep_sweep_idempotence() {
        let cfg = RewriteConfig::default();
        let doc = json!({
            "a": ["north  FACE", { "b": "The north face's jacket" }],
            "c": "northface stays"
        });

        let once = canonicalize(doc, "the north face", &cfg);
        assert_eq!(once.canonical_brand, "The North Face");
        let twice = canonicalize(once.document.clone(), &once.canonical_brand, &cfg);
        assert_eq!(twice.document, once.document);
    }
}
