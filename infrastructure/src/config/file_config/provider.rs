//! Provider configuration from TOML (`[provider]` section)

use serde::{Deserialize, Serialize};

/// Hosted model provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Environment variable name for the API key (default: "GOOGLE_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Base URL of the Generative Language API.
    pub base_url: String,
    /// Model name (default: "gemma-3-27b-it"). `GEMMA_MODEL_NAME` overrides it.
    pub model: String,
    pub temperature: f64,
    pub max_output_tokens: u32,
    /// Hard timeout for one provider call, in seconds.
    pub timeout_seconds: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GOOGLE_API_KEY".to_string(),
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemma-3-27b-it".to_string(),
            temperature: 0.1,
            max_output_tokens: 1000,
            timeout_seconds: 30,
        }
    }
}

impl FileProviderConfig {
    /// Resolve the API key: direct value first, then the configured env var.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }

    /// Model name, honoring the `GEMMA_MODEL_NAME` override.
    pub fn resolve_model(&self) -> String {
        std::env::var("GEMMA_MODEL_NAME")
            .ok()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| self.model.clone())
    }
}
