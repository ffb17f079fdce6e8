use canonical::RewriteConfig;
use generator::GeneratorConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Environment variable read when `generator.api_key` is not configured.
pub const API_KEY_FALLBACK_ENV: &str = "OPENAI_API_KEY";

/// Server configuration
///
/// Sources, lowest precedence first: built-in defaults, an optional
/// `server.{toml,yaml,json}` file, then `LISTGEN__*` environment variables
/// (`LISTGEN__PORT=9000`, `LISTGEN__GENERATOR__MODEL=gpt-4o`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds. Covers the generator round trip.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Chat-completions endpoint settings
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Brand rewrite settings
    #[serde(default)]
    pub rewrite: RewriteConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            max_body_size_mb: default_max_body_size_mb(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            generator: GeneratorConfig::default(),
            rewrite: RewriteConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config files
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("server").required(false))
            // Override with environment variables
            .add_source(config::Environment::with_prefix("LISTGEN").separator("__"));

        let mut config: ServerConfig = builder.build()?.try_deserialize()?;
        config.apply_api_key_fallback(std::env::var(API_KEY_FALLBACK_ENV).ok());

        if config.generator.api_key().is_none() {
            tracing::warn!(
                "No generator API key configured; set LISTGEN__GENERATOR__API_KEY or {API_KEY_FALLBACK_ENV}"
            );
        }

        Ok(config)
    }

    /// Fills `generator.api_key` from `fallback` when no usable key is set.
    pub fn apply_api_key_fallback(&mut self, fallback: Option<String>) {
        if self.generator.api_key().is_none() {
            if let Some(key) = fallback.filter(|key| !key.trim().is_empty()) {
                self.generator.api_key = Some(key);
            }
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    90
}

fn default_max_body_size_mb() -> usize {
    1
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
