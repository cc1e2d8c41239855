//! Invoker parameters: retry, rate limiting and history window.
//!
//! [`InvokerParams`] groups the static parameters that control
//! [`LlmInvoker`](crate::use_cases::invoke_llm::LlmInvoker).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Model invocation control parameters.
///
/// | Parameter | Default |
/// |-----------|---------|
/// | `max_attempts` | 3 (2 retries) |
/// | `backoff_base` | 2 s |
/// | `backoff_max` | 10 s |
/// | `attempt_timeout` | 30 s |
/// | `rate_limit_calls` / `rate_limit_window` | 60 per 60 s |
/// | `rate_limit_max_wait` | 30 s |
/// | `history_exchanges` | 3 |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokerParams {
    /// Total attempts per invocation, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry; doubled on each further retry.
    pub backoff_base: Duration,
    /// Upper bound for a single backoff delay.
    pub backoff_max: Duration,
    /// Hard timeout for one provider call.
    pub attempt_timeout: Duration,
    /// Provider calls allowed per `rate_limit_window`.
    pub rate_limit_calls: usize,
    pub rate_limit_window: Duration,
    /// Longest a caller may wait for rate-limit capacity.
    pub rate_limit_max_wait: Duration,
    /// Prior user/assistant exchanges sent as context.
    pub history_exchanges: usize,
}

impl Default for InvokerParams {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base: Duration::from_secs(2),
            backoff_max: Duration::from_secs(10),
            attempt_timeout: Duration::from_secs(30),
            rate_limit_calls: 60,
            rate_limit_window: Duration::from_secs(60),
            rate_limit_max_wait: Duration::from_secs(30),
            history_exchanges: 3,
        }
    }
}

impl InvokerParams {
    // ==================== Builder Methods ====================

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn with_backoff(mut self, base: Duration, max: Duration) -> Self {
        self.backoff_base = base;
        self.backoff_max = max;
        self
    }

    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    pub fn with_rate_limit(mut self, calls: usize, window: Duration, max_wait: Duration) -> Self {
        self.rate_limit_calls = calls;
        self.rate_limit_window = window;
        self.rate_limit_max_wait = max_wait;
        self
    }

    pub fn with_history_exchanges(mut self, exchanges: usize) -> Self {
        self.history_exchanges = exchanges;
        self
    }

    /// Number of turns sent as history (two per exchange).
    pub fn history_turns(&self) -> usize {
        self.history_exchanges.saturating_mul(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = InvokerParams::default();
        assert_eq!(params.max_attempts, 3);
        assert_eq!(params.rate_limit_calls, 60);
        assert_eq!(params.rate_limit_window, Duration::from_secs(60));
        assert_eq!(params.history_turns(), 6);
    }

    #[test]
    fn test_builders() {
        let params = InvokerParams::default()
            .with_max_attempts(5)
            .with_backoff(Duration::from_millis(10), Duration::from_millis(40))
            .with_rate_limit(2, Duration::from_secs(1), Duration::from_millis(500))
            .with_history_exchanges(1);
        assert_eq!(params.max_attempts, 5);
        assert_eq!(params.backoff_max, Duration::from_millis(40));
        assert_eq!(params.rate_limit_calls, 2);
        assert_eq!(params.history_turns(), 2);
    }
}
