//! LLM invocation with bounded retry and rate limiting.
//!
//! [`LlmInvoker`] sends one question (plus a window of prior turns) to the
//! [`LlmGateway`] and returns the raw reply text. Each attempt is gated by
//! the shared [`SlidingWindowLimiter`] and bounded by a hard timeout.
//! Transient failures are retried with exponential backoff; terminal ones
//! return at once.
//!
//! The invoker does not judge the reply text and does not touch
//! conversation history.

pub mod rate_limiter;
pub mod retry;

pub use rate_limiter::{RateLimitError, SlidingWindowLimiter};
pub use retry::RetryPolicy;

use crate::config::InvokerParams;
use crate::ports::llm_gateway::{CompletionRequest, ErrorClass, GatewayError, LlmGateway};
use sma_domain::util::preview;
use sma_domain::{ConversationTurn, SystemPrompt};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Terminal failures of [`LlmInvoker::invoke`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvokeError {
    #[error("Provider call failed permanently: {0}")]
    Terminal(GatewayError),

    #[error("Provider call failed after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: GatewayError },

    #[error(transparent)]
    RateLimited(#[from] RateLimitError),
}

impl InvokeError {
    /// Whether a higher layer could reasonably try again later.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, InvokeError::Terminal(_))
    }
}

/// Wraps the model call with retry, backoff, timeout and rate limiting.
#[derive(Clone)]
pub struct LlmInvoker {
    gateway: Arc<dyn LlmGateway>,
    limiter: Arc<SlidingWindowLimiter>,
    retry: RetryPolicy,
    attempt_timeout: Duration,
    history_turns: usize,
}

impl LlmInvoker {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        limiter: Arc<SlidingWindowLimiter>,
        params: &InvokerParams,
    ) -> Self {
        Self {
            gateway,
            limiter,
            retry: RetryPolicy::from_params(params),
            attempt_timeout: params.attempt_timeout,
            history_turns: params.history_turns(),
        }
    }

    /// Build an invoker with its own limiter, sized from `params`.
    pub fn with_own_limiter(gateway: Arc<dyn LlmGateway>, params: &InvokerParams) -> Self {
        let limiter = Arc::new(SlidingWindowLimiter::new(
            params.rate_limit_calls,
            params.rate_limit_window,
            params.rate_limit_max_wait,
        ));
        Self::new(gateway, limiter, params)
    }

    /// Number of prior turns forwarded to the model.
    pub fn history_turns(&self) -> usize {
        self.history_turns
    }

    /// Send `question_text` to the model and return the raw reply.
    ///
    /// `history` is most-recent-last; only the configured window of it is sent.
    pub async fn invoke(
        &self,
        question_text: &str,
        system_prompt: &SystemPrompt,
        history: &[ConversationTurn],
    ) -> Result<String, InvokeError> {
        let skip = history.len().saturating_sub(self.history_turns);
        let request = CompletionRequest {
            system_prompt: system_prompt.as_str().to_string(),
            history: history[skip..].to_vec(),
            user_text: question_text.to_string(),
        };

        let max_attempts = self.retry.max_attempts;
        let mut attempt = 0;
        loop {
            attempt += 1;
            self.limiter.acquire().await?;

            debug!(
                "Calling {} (attempt {}/{}, {} history turns): {}",
                self.gateway.name(),
                attempt,
                max_attempts,
                request.history.len(),
                preview(question_text, 80)
            );

            let err = match tokio::time::timeout(
                self.attempt_timeout,
                self.gateway.complete(&request),
            )
            .await
            {
                Ok(Ok(reply)) => {
                    debug!("Received {} bytes from {}", reply.len(), self.gateway.name());
                    return Ok(reply);
                }
                Ok(Err(e)) => e,
                Err(_) => GatewayError::Timeout,
            };

            match err.class() {
                ErrorClass::Terminal => {
                    error!("{} call failed permanently: {}", self.gateway.name(), err);
                    return Err(InvokeError::Terminal(err));
                }
                ErrorClass::Transient if attempt >= max_attempts => {
                    error!(
                        "{} call failed after {} attempts: {}",
                        self.gateway.name(),
                        attempt,
                        err
                    );
                    return Err(InvokeError::RetriesExhausted {
                        attempts: attempt,
                        last: err,
                    });
                }
                ErrorClass::Transient => {
                    let delay = self.retry.delay_for(attempt);
                    warn!(
                        "{} call failed (attempt {}/{}), retrying in {:?}: {}",
                        self.gateway.name(),
                        attempt,
                        max_attempts,
                        delay,
                        err
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
