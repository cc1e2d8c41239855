//! Google Generative Language API gateway.
//!
//! Sends one `generateContent` request per call. Prior turns become
//! `contents` entries (assistant turns use the `model` role). Gemma models
//! do not accept `systemInstruction`, so for them the system prompt is
//! prepended to the user text instead.

use crate::config::FileProviderConfig;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Value, json};
use sma_application::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use sma_domain::Role;
use std::time::Duration;
use tracing::debug;

/// Connection settings for [`GeminiGateway`].
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub timeout: Duration,
}

impl GeminiSettings {
    /// Build settings from the `[provider]` section.
    ///
    /// Fails when no API key is configured.
    pub fn from_config(config: &FileProviderConfig) -> Result<Self, GatewayError> {
        let api_key = config.resolve_api_key().ok_or_else(|| {
            GatewayError::AuthenticationFailed(format!(
                "{} environment variable is not set",
                config.api_key_env
            ))
        })?;

        Ok(Self {
            api_key,
            base_url: config.base_url.clone(),
            model: config.resolve_model(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
            timeout: Duration::from_secs(config.timeout_seconds),
        })
    }
}

/// Where the system prompt goes in the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptPlacement {
    SystemInstruction,
    Inline,
}

impl PromptPlacement {
    fn for_model(model: &str) -> Self {
        if model.to_ascii_lowercase().starts_with("gemma") {
            PromptPlacement::Inline
        } else {
            PromptPlacement::SystemInstruction
        }
    }
}

pub struct GeminiGateway {
    client: reqwest::Client,
    settings: GeminiSettings,
    placement: PromptPlacement,
}

impl GeminiGateway {
    pub fn new(settings: GeminiSettings) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| GatewayError::ConnectionError(format!("HTTP client setup failed: {e}")))?;

        Ok(Self {
            client,
            placement: PromptPlacement::for_model(&settings.model),
            settings,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }

    fn build_payload(&self, request: &CompletionRequest) -> Value {
        let mut contents: Vec<Value> = request
            .history
            .iter()
            .map(|turn| {
                let role = match turn.role {
                    Role::User => "user",
                    Role::Assistant => "model",
                };
                json!({ "role": role, "parts": [{ "text": turn.text }] })
            })
            .collect();

        let user_text = match self.placement {
            PromptPlacement::Inline => format!(
                "{}\n\nUser Question: {}",
                request.system_prompt, request.user_text
            ),
            PromptPlacement::SystemInstruction => request.user_text.clone(),
        };
        contents.push(json!({ "role": "user", "parts": [{ "text": user_text }] }));

        let mut payload = json!({
            "contents": contents,
            "generationConfig": {
                "temperature": self.settings.temperature,
                "maxOutputTokens": self.settings.max_output_tokens,
            },
        });

        if self.placement == PromptPlacement::SystemInstruction {
            payload["systemInstruction"] = json!({ "parts": [{ "text": request.system_prompt }] });
        }

        payload
    }
}

/// Map a non-success status and its body to a classified error.
fn classify_status(status: StatusCode, body: &str) -> GatewayError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| format!("HTTP {}: {}", status.as_u16(), body.trim()));

    match status.as_u16() {
        401 | 403 => GatewayError::AuthenticationFailed(message),
        400 | 404 => GatewayError::InvalidRequest(message),
        429 => GatewayError::QuotaExceeded(message),
        code => GatewayError::ServerError {
            status: code,
            message,
        },
    }
}

/// Concatenate the text parts of the first candidate.
///
/// A candidate without text (e.g. blocked by safety filters) yields an
/// empty string; judging it is left to the caller.
fn extract_text(body: &str) -> Result<String, GatewayError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| GatewayError::MalformedResponse(format!("invalid JSON: {e}")))?;

    if let Some(message) = value["error"]["message"].as_str() {
        return Err(GatewayError::MalformedResponse(message.to_string()));
    }

    let Some(candidates) = value["candidates"].as_array() else {
        return Err(GatewayError::MalformedResponse(
            "response has no candidates".to_string(),
        ));
    };

    Ok(candidates
        .first()
        .and_then(|c| c["content"]["parts"].as_array())
        .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
        .unwrap_or_default())
}

fn transport_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::ConnectionError(err.to_string())
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    fn name(&self) -> &str {
        &self.settings.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        let payload = self.build_payload(request);
        debug!(
            "POST {} ({} history turns)",
            self.endpoint(),
            request.history.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.settings.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(classify_status(status, &body));
        }

        extract_text(&body)
    }
}
