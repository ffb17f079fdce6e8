use crate::config::ServerConfig;
use crate::error::ServerResult;
use generator::{ChatCompletionsGenerator, ListingGenerator};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Listing generator (shared across requests)
    pub generator: Arc<dyn ListingGenerator>,
}

impl ServerState {
    /// Create new server state backed by the configured chat-completions endpoint
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let generator = ChatCompletionsGenerator::new(config.generator.clone())?;
        Ok(Self::with_generator(config, Arc::new(generator)))
    }

    /// Create server state around an existing generator
    pub fn with_generator(config: ServerConfig, generator: Arc<dyn ListingGenerator>) -> Self {
        Self {
            config: Arc::new(config),
            generator,
        }
    }

    /// Whether a generator API key is configured
    pub fn generator_configured(&self) -> bool {
        self.config.generator.api_key().is_some()
    }
}
