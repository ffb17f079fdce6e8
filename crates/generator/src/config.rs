use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::retry::RetryConfig;

/// Connection settings for an OpenAI-compatible chat-completions endpoint.
///
/// The API key is an explicit value; nothing in this crate reads the
/// environment.
///
/// # Example
/// ```no_run
/// use generator::{ChatCompletionsGenerator, GeneratorConfig};
///
/// let cfg = GeneratorConfig {
///     api_key: Some("sk-...".into()),
///     ..Default::default()
/// };
/// let generator = ChatCompletionsGenerator::new(cfg).expect("client builds");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Full URL of the chat-completions endpoint.
    pub api_url: String,
    /// Bearer token. `None` makes every call fail with `MissingApiKey`.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Model identifier sent with each request.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Overall request timeout in seconds.
    pub timeout_secs: u64,
    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Retry transient failures.
    pub enable_retry: bool,
    pub retry: RetryConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1/chat/completions".into(),
            api_key: None,
            model: "gpt-4o-mini".into(),
            temperature: 0.6,
            timeout_secs: 60,
            connect_timeout_secs: 10,
            enable_retry: true,
            retry: RetryConfig::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// The configured key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Retry policy actually in force; a single attempt when retries are off.
    pub fn effective_retry(&self) -> RetryConfig {
        if self.enable_retry {
            self.retry
        } else {
            self.retry.with_max_retries(0)
        }
    }
}
