//! Configuration for brand rewriting.
//!
//! ```rust
//! use canonical::RewriteConfig;
//!
//! let config = RewriteConfig::default();
//! assert!(config.keep_suffix);
//! ```

use serde::{Deserialize, Serialize};

/// Controls how a matched brand is written back.
///
/// Serialized form:
///
/// ```json
/// { "keep_suffix": true }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RewriteConfig {
    /// Keep the `'s`, `’s` or `s` that followed a matched brand.
    ///
    /// When `false` the suffix is dropped and only the canonical brand is
    /// written, so `"Nike's shoes"` becomes `"Nike shoes"`.
    pub keep_suffix: bool,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self { keep_suffix: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let cfg: RewriteConfig = serde_json::from_str("{}").expect("empty object deserializes");
        assert_eq!(cfg, RewriteConfig::default());

        let cfg: RewriteConfig =
            serde_json::from_str(r#"{"keep_suffix": false}"#).expect("explicit field");
        assert!(!cfg.keep_suffix);
    }
}
