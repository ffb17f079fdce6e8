use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use crate::prompt::ListingPrompt;
use crate::retry::execute_with_retry;

/// Produces a flat map of listing fields from a prompt.
///
/// Implementations must be shareable across request handlers. Tests and
/// offline tooling plug in canned generators through this trait.
#[async_trait]
pub trait ListingGenerator: Send + Sync {
    async fn generate(&self, prompt: &ListingPrompt) -> Result<Map<String, Value>, GeneratorError>;
}

/// Generator backed by an OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct ChatCompletionsGenerator {
    config: GeneratorConfig,
    client: reqwest::Client,
}

impl ChatCompletionsGenerator {
    /// Builds a generator with a pooled HTTP client using the configured
    /// timeouts.
    pub fn new(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .pool_max_idle_per_host(8)
            .build()
            .map_err(|e| GeneratorError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(config, client))
    }

    /// Uses a caller-supplied HTTP client as is.
    pub fn with_client(config: GeneratorConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Request body for one completion.
    pub fn build_payload(&self, prompt: &ListingPrompt) -> Value {
        json!({
            "model": self.config.model,
            "temperature": self.config.temperature,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": prompt.system },
                { "role": "user", "content": prompt.user }
            ]
        })
    }

    async fn send_once(&self, api_key: &str, payload: &Value) -> Result<Value, GeneratorError> {
        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| GeneratorError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| GeneratorError::InvalidResponse(format!("invalid JSON response: {e}")))
    }
}

#[async_trait]
impl ListingGenerator for ChatCompletionsGenerator {
    async fn generate(&self, prompt: &ListingPrompt) -> Result<Map<String, Value>, GeneratorError> {
        self.complete(prompt).await
    }
}

impl ChatCompletionsGenerator {
    async fn complete(&self, prompt: &ListingPrompt) -> Result<Map<String, Value>, GeneratorError> {
        let api_key = self.config.api_key().ok_or(GeneratorError::MissingApiKey)?;
        let payload = self.build_payload(prompt);
        let payload = &payload;
        let model = self.config.model.as_str();
        let retry = self.config.effective_retry();

        let outcome = execute_with_retry(
            &retry,
            move |attempt| async move {
                if attempt > 0 {
                    debug!(attempt, model, "retrying chat completion");
                }
                let result = self.send_once(api_key, payload).await;
                if let Err(err) = &result {
                    warn!(
                        attempt,
                        error = %err,
                        retryable = err.is_retryable(),
                        "chat completion attempt failed"
                    );
                }
                result
            },
            GeneratorError::is_retryable,
        )
        .await;

        let attempts = outcome.attempts;
        let elapsed_ms = outcome.total_duration.as_millis() as u64;
        let body = outcome.into_result()?;
        info!(attempts, elapsed_ms, model, "chat completion received");

        parse_completion(&body)
    }
}

/// Extracts the listing fields from a chat-completions response body.
///
/// The first choice's message content is parsed as JSON. Missing or empty
/// content counts as `{}`.
pub fn parse_completion(body: &Value) -> Result<Map<String, Value>, GeneratorError> {
    let content = body
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .filter(|content| !content.is_empty())
        .unwrap_or("{}");
    parse_listing_content(content)
}

fn parse_listing_content(content: &str) -> Result<Map<String, Value>, GeneratorError> {
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(GeneratorError::NotAnObject),
        Err(_) => Err(GeneratorError::NonJson {
            raw: content.to_string(),
        }),
    }
}
