//! Listing draft generation.
//!
//! Turns seller data into a chat prompt and asks an OpenAI-compatible
//! chat-completions endpoint for a JSON object of listing fields.
//!
//! ```text
//! PromptInput ──build_prompt──▶ ListingPrompt ──ListingGenerator::generate──▶ Map<String, Value>
//! ```
//!
//! The HTTP client is constructed from an explicit [`GeneratorConfig`];
//! nothing here reads the environment. Transient upstream failures are
//! retried with exponential backoff (see [`RetryConfig`]).

mod client;
mod config;
mod error;
mod prompt;
mod retry;
mod serde_millis;

pub use crate::client::{parse_completion, ChatCompletionsGenerator, ListingGenerator};
pub use crate::config::GeneratorConfig;
pub use crate::error::GeneratorError;
pub use crate::prompt::{build_prompt, ListingPrompt, PromptInput, LISTING_FIELDS};
pub use crate::retry::{execute_with_retry, RetryConfig, RetryResult};
