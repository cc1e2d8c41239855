//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types
//! with [`FileConfig::to_pipeline_config`].

mod confidence;
mod history;
mod invoker;
mod logging;
mod prompt;
mod provider;
mod server;

pub use confidence::FileConfidenceConfig;
pub use history::FileHistoryConfig;
pub use invoker::FileInvokerConfig;
pub use logging::FileLoggingConfig;
pub use prompt::FilePromptConfig;
pub use provider::FileProviderConfig;
pub use server::FileServerConfig;

use serde::{Deserialize, Serialize};
use sma_application::{FallbackResponses, PipelineConfig};
use sma_domain::{CoercionPolicy, Confidence};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    #[error("{field} cannot be 0")]
    Zero { field: &'static str },

    #[error("{field} must be within [0, 1], got {value}")]
    ConfidenceOutOfRange { field: &'static str, value: f64 },

    #[error("model name cannot be empty")]
    EmptyModelName,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub provider: FileProviderConfig,
    pub invoker: FileInvokerConfig,
    pub confidence: FileConfidenceConfig,
    pub history: FileHistoryConfig,
    pub server: FileServerConfig,
    pub prompt: FilePromptConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        let counts: [(&'static str, u64); 6] = [
            ("provider.timeout_seconds", self.provider.timeout_seconds),
            ("invoker.max_attempts", u64::from(self.invoker.max_attempts)),
            ("invoker.rate_limit_calls", self.invoker.rate_limit_calls as u64),
            (
                "invoker.rate_limit_window_seconds",
                self.invoker.rate_limit_window_seconds,
            ),
            ("server.port", u64::from(self.server.port)),
            ("history.max_turns", self.history.max_turns as u64),
        ];
        issues.extend(
            counts
                .into_iter()
                .filter(|(_, value)| *value == 0)
                .map(|(field, _)| ConfigValidationError::Zero { field }),
        );

        for (field, value) in self.confidence.fields() {
            if Confidence::new(value).is_err() {
                issues.push(ConfigValidationError::ConfidenceOutOfRange { field, value });
            }
        }

        if self.provider.model.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyModelName);
        }

        issues
    }

    /// Convert to the application's [`PipelineConfig`].
    ///
    /// Fails with the first validation issue, if any.
    pub fn to_pipeline_config(&self) -> Result<PipelineConfig, ConfigValidationError> {
        if let Some(issue) = self.validate().into_iter().next() {
            return Err(issue);
        }

        let confidence = |field: &'static str, value: f64| {
            Confidence::new(value)
                .map_err(|_| ConfigValidationError::ConfidenceOutOfRange { field, value })
        };

        Ok(PipelineConfig {
            invoker: self
                .invoker
                .to_invoker_params(Duration::from_secs(self.provider.timeout_seconds)),
            coercion: CoercionPolicy {
                suspect: confidence("confidence.suspect", self.confidence.suspect)?,
                unstructured: confidence("confidence.unstructured", self.confidence.unstructured)?,
            },
            responses: FallbackResponses {
                redirect_confidence: confidence("confidence.redirect", self.confidence.redirect)?,
                fallback_confidence: confidence("confidence.fallback", self.confidence.fallback)?,
                ..FallbackResponses::default()
            },
            history: self.history.to_context_limits(),
        })
    }
}
