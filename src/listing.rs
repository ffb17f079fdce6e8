//! Request and response shapes of the listing endpoint.
//!
//! ```text
//! ListingResponse (one flat JSON object, in this key order)
//! ├── tpl                 # echoed from the request, omitted when absent
//! ├── aiInput             # product attributes, brand replaced by its canonical form
//! ├── facts               # shipping facts, echoed
//! ├── brand               # canonical brand ("" when none was given)
//! └── <generated fields>  # Title, Subtitle, ..., mainText
//! ```

use generator::PromptInput;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Seller input for one listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ListingRequest {
    /// Opaque template selector, echoed back untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tpl: Option<Value>,

    pub category: Option<String>,
    /// Seller's free-text description.
    #[serde(rename = "mainText")]
    pub main_text: Option<String>,
    /// Brand as the seller typed it.
    pub brand: Option<String>,
    pub condition: Option<String>,
    pub model: Option<String>,
    pub material: Option<String>,
    pub color: Option<String>,
    pub features: Option<String>,

    pub handling_time: Option<String>,
    pub ships_from: Option<String>,
    pub estimated_delivery: Option<String>,
}

impl ListingRequest {
    /// The raw brand, or `""` when absent.
    pub fn raw_brand(&self) -> &str {
        self.brand.as_deref().unwrap_or("")
    }

    pub fn prompt_input(&self) -> PromptInput {
        PromptInput {
            category: self.category.clone(),
            main_text: self.main_text.clone(),
            condition: self.condition.clone(),
            model: self.model.clone(),
            material: self.material.clone(),
            color: self.color.clone(),
            features: self.features.clone(),
        }
    }

    fn ai_input(&self, canonical_brand: &str) -> Map<String, Value> {
        let mut fields = Map::new();
        put(&mut fields, "category", &self.category);
        put(&mut fields, "mainText", &self.main_text);
        fields.insert("brand".into(), Value::String(canonical_brand.to_string()));
        put(&mut fields, "condition", &self.condition);
        put(&mut fields, "model", &self.model);
        put(&mut fields, "material", &self.material);
        put(&mut fields, "color", &self.color);
        put(&mut fields, "features", &self.features);
        fields
    }

    fn facts(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        put(&mut fields, "handling_time", &self.handling_time);
        put(&mut fields, "ships_from", &self.ships_from);
        put(&mut fields, "estimated_delivery", &self.estimated_delivery);
        fields
    }
}

fn put(fields: &mut Map<String, Value>, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        fields.insert(key.to_string(), Value::String(value.clone()));
    }
}

/// Finished listing: request echo followed by the generated fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ListingResponse {
    fields: Map<String, Value>,
}

impl ListingResponse {
    /// Lays out the response.
    ///
    /// Generated keys are applied last. A generated key that repeats an
    /// earlier one (say `brand`) replaces its value in place.
    pub fn assemble(request: &ListingRequest, canonical_brand: &str, generated: Value) -> Self {
        let mut fields = Map::new();
        if let Some(tpl) = &request.tpl {
            fields.insert("tpl".into(), tpl.clone());
        }
        fields.insert("aiInput".into(), Value::Object(request.ai_input(canonical_brand)));
        fields.insert("facts".into(), Value::Object(request.facts()));
        fields.insert("brand".into(), Value::String(canonical_brand.to_string()));

        if let Value::Object(generated) = generated {
            for (key, value) in generated {
                fields.insert(key, value);
            }
        }

        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}
