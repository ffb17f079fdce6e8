//! Workspace umbrella crate for listgen.
//!
//! Stitches prompt generation and brand canonicalization together so callers
//! turn seller input into a finished listing with a single entry point,
//! [`generate_listing`].

mod listing;
mod metrics;
mod pipeline;

pub use canonical::{
    BrandReport, CanonicalListing, RewriteConfig, canonicalize, enforce_brand, ensure_narrative,
    resolve_canonical_brand,
};
pub use generator::{
    ChatCompletionsGenerator, GeneratorConfig, GeneratorError, LISTING_FIELDS, ListingGenerator,
    ListingPrompt, PromptInput, build_prompt,
};

pub use crate::listing::{ListingRequest, ListingResponse};
pub use crate::metrics::{PipelineMetrics, set_pipeline_metrics};
pub use crate::pipeline::generate_listing;

use std::error::Error;
use std::fmt;

/// Errors that can occur while generating a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    Generator(GeneratorError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Generator(err) => write!(f, "listing generation failed: {err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Generator(err) => Some(err),
        }
    }
}

impl From<GeneratorError> for PipelineError {
    fn from(value: GeneratorError) -> Self {
        PipelineError::Generator(value)
    }
}
