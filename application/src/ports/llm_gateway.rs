//! LLM Gateway port
//!
//! Defines the interface for communicating with the hosted model.

use async_trait::async_trait;
use sma_domain::ConversationTurn;
use thiserror::Error;

/// Whether a failed call is worth repeating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Network trouble, timeouts, provider-side 5xx
    Transient,
    /// Authentication, quota, malformed request: retrying cannot help
    Terminal,
}

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Timeout")]
    Timeout,

    #[error("Provider error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl GatewayError {
    pub fn class(&self) -> ErrorClass {
        match self {
            GatewayError::ConnectionError(_)
            | GatewayError::Timeout
            | GatewayError::ServerError { .. }
            | GatewayError::MalformedResponse(_) => ErrorClass::Transient,
            GatewayError::AuthenticationFailed(_)
            | GatewayError::QuotaExceeded(_)
            | GatewayError::InvalidRequest(_) => ErrorClass::Terminal,
        }
    }

    pub fn is_transient(&self) -> bool {
        self.class() == ErrorClass::Transient
    }
}

/// One model call: fixed system prompt, prior turns (most recent last) and
/// the new user text.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub history: Vec<ConversationTurn>,
    pub user_text: String,
}

/// Gateway for LLM communication
///
/// This port defines how the application layer talks to the model provider.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Provider name, for logs
    fn name(&self) -> &str;

    /// Send one request and return the reply text.
    ///
    /// A successful call may still return blank or badly formatted text;
    /// judging the text is not the gateway's job.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError>;
}
