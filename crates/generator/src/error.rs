use thiserror::Error;

/// Errors surfaced while asking the external generator for a listing draft.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    /// No API key was configured; nothing was sent.
    #[error("generator api key is not configured")]
    MissingApiKey,
    /// Configuration is inconsistent (e.g. an unparseable endpoint).
    #[error("invalid generator config: {0}")]
    InvalidConfig(String),
    /// The request never produced an HTTP response.
    #[error("generator request failed: {0}")]
    Transport(String),
    /// The endpoint answered with a non-success status.
    #[error("generator returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },
    /// The HTTP body was not the expected chat-completions envelope.
    #[error("invalid generator response: {0}")]
    InvalidResponse(String),
    /// The model's message content was not JSON.
    #[error("model returned non-JSON content")]
    NonJson { raw: String },
    /// The model returned JSON, but not an object of fields.
    #[error("model returned JSON that is not an object")]
    NotAnObject,
}

impl GeneratorError {
    /// Whether another attempt could plausibly succeed.
    ///
    /// Transport failures, request timeouts, throttling and server-side
    /// errors are transient. Everything else (bad keys, bad requests, model
    /// output that does not parse) fails the same way on every attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            GeneratorError::Transport(_) => true,
            GeneratorError::Upstream { status, .. } => {
                matches!(status, 408 | 429) || (500..=599).contains(status)
            }
            GeneratorError::MissingApiKey
            | GeneratorError::InvalidConfig(_)
            | GeneratorError::InvalidResponse(_)
            | GeneratorError::NonJson { .. }
            | GeneratorError::NotAnObject => false,
        }
    }
}
