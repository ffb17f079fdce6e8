//! Prompt composition for listing drafts.
//!
//! The system prompt fixes the output shape (JSON only, exactly
//! [`LISTING_FIELDS`], in order) and the brand rule. The user prompt carries
//! the seller's data, with the structured attributes marked authoritative.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Keys the generator is asked to return, in this order.
pub const LISTING_FIELDS: [&str; 14] = [
    "Title",
    "Subtitle",
    "seo_opening_paragraph",
    "seo_description_paragraph_1",
    "seo_description_paragraph_2",
    "seo_description_paragraph_3",
    "seo_long_tail_paragraph",
    "highlight_1",
    "highlight_2",
    "highlight_3",
    "highlight_4",
    "description_paragraph_1",
    "description_paragraph_2",
    "description_paragraph_3",
];

/// Seller-provided product data the prompt is built from.
///
/// Every field is optional; missing values are rendered as empty lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptInput {
    pub category: Option<String>,
    /// Free-text description written by the seller.
    pub main_text: Option<String>,
    pub condition: Option<String>,
    pub model: Option<String>,
    pub material: Option<String>,
    pub color: Option<String>,
    pub features: Option<String>,
}

/// A system/user message pair ready to send to a chat model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListingPrompt {
    pub system: String,
    pub user: String,
}

const SYSTEM_RULES: &str = "\
You are a professional e-commerce listing generator,
specialized in eBay-style product listings.

You MUST return ONLY valid JSON.
No markdown.
No explanations.
No additional text.

Use the exact keys provided.
Do not add new keys.
Do not remove keys.
Do not reorder keys.
If some information is missing, return an empty string for that field.

The output language must be English.
The tone must be professional, clear, and sales-oriented.
Avoid emojis, exclamation marks, and marketing fluff.

Content requirements:

- Title must be no longer than 80 characters.
- Title should start with the main product type when possible.
- The Title MUST include the brand name exactly as provided (canonical form below).
- Do not modify, abbreviate, translate, or paraphrase the brand name.
- Use the canonical brand name consistently in the Title and throughout the description.

Brand name consistency rule (strict, overriding):

- The brand name has a single canonical form (provided in the user message).
- This canonical brand name MUST be used verbatim in all generated text fields.
- If the brand name appears in any other capitalization, spelling, or form
  (including from user-provided description text),
  it MUST be corrected to the canonical form.
- Never output the brand name in lowercase, uppercase, pluralized, abbreviated,
  possessive, or otherwise modified form (use exactly the canonical form).

- Description paragraphs must never be a single long block of text.
- Do not use bullet points or lists in description paragraphs.

- Do not repeat the Title wording in the Subtitle.
- Always generate a short Subtitle (8-12 words) unless it would repeat the Title.
- Format the Subtitle in Title Case.
- Do not capitalize short function words (e.g. and, or, of, in, to, for, with) unless they are the first or last word.

SEO content requirements:

Each seo_description_paragraph must:
- contain at least 2-3 full sentences
- expand on product features, benefits, or usage context
- avoid short, generic, or placeholder-style statements

SEO paragraphs must not be shorter than the description paragraphs.

Avoid vague or filler adjectives such as \"great\", \"excellent\", \"perfect\", or \"high-quality\".
Replace them with concrete, descriptive language based on actual product attributes.
Do not repeat identical wording or sentence structures across different fields.
Do not introduce implied benefits, use cases, or scenarios
unless they are directly supported by the provided input data.

Return the result strictly in the following JSON format:
";

/// Builds the prompt pair for one listing.
///
/// `canonical_brand` is stated as the authoritative brand spelling; an empty
/// brand renders as an empty value.
pub fn build_prompt(input: &PromptInput, canonical_brand: &str) -> ListingPrompt {
    ListingPrompt {
        system: system_prompt(),
        user: user_prompt(input, canonical_brand),
    }
}

fn system_prompt() -> String {
    let mut system = String::from(SYSTEM_RULES);
    system.push_str("\n{\n");
    for (idx, field) in LISTING_FIELDS.iter().enumerate() {
        let comma = if idx + 1 < LISTING_FIELDS.len() { "," } else { "" };
        let _ = writeln!(system, "  \"{field}\": \"\"{comma}");
    }
    system.push_str("}\n");
    system
}

fn user_prompt(input: &PromptInput, canonical_brand: &str) -> String {
    let field = |value: &Option<String>| value.as_deref().unwrap_or("").to_string();

    let mut user = String::from("Generate an e-commerce product listing using the data below.\n\n");
    let _ = writeln!(user, "Category:\n{}\n", field(&input.category));
    let _ = writeln!(user, "User description:\n{}\n", field(&input.main_text));
    user.push_str("Structured data (authoritative):\n");
    let _ = writeln!(user, "Brand (canonical): {canonical_brand}");
    let _ = writeln!(user, "Condition: {}", field(&input.condition));
    let _ = writeln!(user, "Model: {}", field(&input.model));
    let _ = writeln!(user, "Material: {}", field(&input.material));
    let _ = writeln!(user, "Color: {}", field(&input.color));
    let _ = writeln!(user, "Features: {}\n", field(&input.features));
    user.push_str(
        "Data priority rules:\n\
         - Structured fields are authoritative.\n\
         - If there is any conflict, trust structured fields.\n\
         - The user description is supplementary.\n",
    );
    user
}
