//! Fallback for the combined listing description.
//!
//! Generators sometimes leave out the combined `mainText` field while still
//! filling the individual description paragraphs. The helpers here rebuild
//! it from those paragraphs, separated by a blank line.

use serde_json::Value;

use crate::whitespace::value_text;

/// Field holding the combined narrative.
pub const NARRATIVE_FIELD: &str = "mainText";

/// Paragraph fields joined, in order, when the narrative is missing.
pub const PARAGRAPH_FIELDS: [&str; 3] = [
    "description_paragraph_1",
    "description_paragraph_2",
    "description_paragraph_3",
];

const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Joins the trimmed, non-empty description paragraphs of `document`.
///
/// Returns an empty string when every paragraph is missing or blank.
///
/// ```rust
/// use canonical::assemble_fallback_narrative;
/// use serde_json::json;
///
/// let doc = json!({
///     "description_paragraph_1": " A. ",
///     "description_paragraph_2": "",
///     "description_paragraph_3": "B."
/// });
/// assert_eq!(assemble_fallback_narrative(&doc), "A.\n\nB.");
/// ```
pub fn assemble_fallback_narrative(document: &Value) -> String {
    PARAGRAPH_FIELDS
        .into_iter()
        .map(|field| value_text(document.get(field)))
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(PARAGRAPH_SEPARATOR)
}

/// Whether `document` already carries a usable narrative.
///
/// Missing, `null`, `false`, zero and `""` all count as absent. Any other
/// value is kept and left for the caller to interpret.
pub fn has_narrative(document: &Value) -> bool {
    match document.get(NARRATIVE_FIELD) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// Inserts the fallback narrative into an object document that lacks one.
///
/// Returns `true` when the field was written. Non-object documents are left
/// alone.
pub fn ensure_narrative(document: &mut Value) -> bool {
    if has_narrative(document) {
        return false;
    }
    let narrative = assemble_fallback_narrative(document);
    match document.as_object_mut() {
        Some(fields) => {
            fields.insert(NARRATIVE_FIELD.to_string(), Value::String(narrative));
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn all_empty_yields_empty_string() {
        let doc = json!({
            "description_paragraph_1": "  ",
            "description_paragraph_2": ""
        });
        assert_eq!(assemble_fallback_narrative(&doc), "");
        assert_eq!(assemble_fallback_narrative(&json!({})), "");
    }

    #[test]
    fn non_string_paragraphs_are_coerced() {
        let doc = json!({
            "description_paragraph_1": 12,
            "description_paragraph_2": null,
            "description_paragraph_3": ["ignored"]
        });
        assert_eq!(assemble_fallback_narrative(&doc), "12");
    }

    #[test]
    fn internal_newlines_survive() {
        let doc = json!({ "description_paragraph_1": "line one\nline two " });
        assert_eq!(assemble_fallback_narrative(&doc), "line one\nline two");
    }

    #[test]
    fn ensure_fills_only_when_missing() {
        let mut doc = json!({ "description_paragraph_1": "A.", "description_paragraph_3": "C." });
        assert!(ensure_narrative(&mut doc));
        assert_eq!(doc[NARRATIVE_FIELD], "A.\n\nC.");

        let mut kept = json!({ "mainText": "Given.", "description_paragraph_1": "A." });
        assert!(!ensure_narrative(&mut kept));
        assert_eq!(kept[NARRATIVE_FIELD], "Given.");

        let mut blank = json!({ "mainText": "", "description_paragraph_2": "B." });
        assert!(ensure_narrative(&mut blank));
        assert_eq!(blank[NARRATIVE_FIELD], "B.");
    }

    #[test]
    fn falsy_narratives_are_replaced() {
        for falsy in [json!(0), json!(0.0), json!(false), json!(null), json!("")] {
            let mut doc = json!({ "mainText": falsy, "description_paragraph_1": "A." });
            assert!(ensure_narrative(&mut doc));
            assert_eq!(doc[NARRATIVE_FIELD], "A.");
        }

        for kept in [json!(7), json!(true), json!(["x"]), json!({})] {
            let mut doc = json!({ "mainText": kept.clone(), "description_paragraph_1": "A." });
            assert!(!ensure_narrative(&mut doc));
            assert_eq!(doc[NARRATIVE_FIELD], kept);
        }
    }

    #[test]
    fn ensure_ignores_non_objects() {
        let mut doc = json!(["description_paragraph_1"]);
        assert!(!ensure_narrative(&mut doc));
        assert_eq!(doc, json!(["description_paragraph_1"]));
    }
}
