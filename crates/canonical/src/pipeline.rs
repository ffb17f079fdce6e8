use serde_json::Value;

use crate::brand::resolve_canonical_brand;
use crate::config::RewriteConfig;
use crate::document::{BrandReport, CanonicalListing};
use crate::rewrite::BrandRewriter;

/// Main entry point. Takes a generated document and the caller's raw brand
/// and returns the document with every brand mention in canonical form.
pub fn canonicalize(document: Value, raw_brand: &str, cfg: &RewriteConfig) -> CanonicalListing {
    let mut document = document;
    let report = enforce_brand(&mut document, raw_brand, cfg);
    CanonicalListing {
        document,
        canonical_brand: report.canonical_brand.clone(),
        report,
    }
}

/// In-place form of [`canonicalize`].
///
/// Three passes run in order:
///
/// 1. top-level string fields, matching the raw brand as the caller typed it;
/// 2. top-level string fields, matching the canonical brand;
/// 3. every string leaf of the tree, matching the canonical brand.
///
/// Pass 1 is not covered by pass 3. Title-casing uses the full uppercase
/// mapping, which can change a brand's length ("ßmart" becomes "SSmart"),
/// and case-insensitive matching uses simple folding, so text spelled like
/// the raw brand is only found by the raw matcher.
pub fn enforce_brand(document: &mut Value, raw_brand: &str, cfg: &RewriteConfig) -> BrandReport {
    let canonical_brand = resolve_canonical_brand(raw_brand);
    let mut report = BrandReport {
        canonical_brand,
        ..BrandReport::default()
    };
    if report.is_noop() {
        return report;
    }

    let canonical = report.canonical_brand.as_str();
    let Some(sweeper) = BrandRewriter::new(canonical, canonical, cfg) else {
        return report;
    };

    if let Value::Object(fields) = document {
        if let Some(raw) = BrandRewriter::new(raw_brand, canonical, cfg) {
            report.raw_pass = raw.rewrite_fields(fields);
        }
        report.canonical_pass = sweeper.rewrite_fields(fields);
    }
    report.sweep = sweeper.sweep(document);

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_brand_is_a_noop() {
        let doc = json!({ "Title": "nike shoes" });
        let out = canonicalize(doc.clone(), "   ", &RewriteConfig::default());
        assert_eq!(out.document, doc);
        assert_eq!(out.canonical_brand, "");
        assert!(out.report.is_noop());
        assert_eq!(out.report.total(), 0);
    }

    #[test]
    fn mixed_spellings_converge() {
        let doc = json!({ "Title": "NIKE shoes and Nike's bag" });
        let out = canonicalize(doc, "nike", &RewriteConfig::default());
        assert_eq!(out.canonical_brand, "Nike");
        assert_eq!(out.document["Title"], "Nike shoes and Nike's bag");
    }

    #[test]
    fn raw_pass_catches_what_the_sweep_cannot() {
        let mut doc = json!({ "Title": "ßmart blender", "nested": ["ßmart"] });
        let report = enforce_brand(&mut doc, "ßmart", &RewriteConfig::default());

        assert_eq!(report.canonical_brand, "SSmart");
        assert_eq!(report.raw_pass, 1);
        assert_eq!(doc["Title"], "SSmart blender");
        // Nested values are only reached by the sweep, which matches "SSmart".
        assert_eq!(doc["nested"], json!(["ßmart"]));
    }

    #[test]
    fn non_object_roots_are_swept() {
        let mut doc = json!(["apple pie", { "k": "APPLE" }]);
        let report = enforce_brand(&mut doc, "apple", &RewriteConfig::default());
        assert_eq!(report.raw_pass, 0);
        assert_eq!(report.canonical_pass, 0);
        assert_eq!(report.sweep, 2);
        assert_eq!(doc, json!(["Apple pie", { "k": "Apple" }]));
    }

    #[test]
    fn uppercase_brand_is_kept_verbatim() {
        let mut doc = json!({ "Title": "ikea shelf", "highlight_1": "Ikea's design" });
        enforce_brand(&mut doc, "IKEA", &RewriteConfig::default());
        assert_eq!(doc["Title"], "IKEA shelf");
        assert_eq!(doc["highlight_1"], "IKEA's design");
    }
}
