//! Invoker configuration from TOML (`[invoker]` section)

use serde::{Deserialize, Serialize};
use sma_application::InvokerParams;
use std::time::Duration;

/// Retry, rate limiting and history window of model calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInvokerConfig {
    pub max_attempts: u32,
    pub backoff_base_ms: u64,
    pub backoff_max_ms: u64,
    pub rate_limit_calls: usize,
    pub rate_limit_window_seconds: u64,
    pub rate_limit_max_wait_seconds: u64,
    /// Prior user/assistant exchanges sent to the model.
    pub history_exchanges: usize,
}

impl Default for FileInvokerConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base_ms: 2000,
            backoff_max_ms: 10_000,
            rate_limit_calls: 60,
            rate_limit_window_seconds: 60,
            rate_limit_max_wait_seconds: 30,
            history_exchanges: 3,
        }
    }
}

impl FileInvokerConfig {
    /// Convert to [`InvokerParams`], using the provider's call timeout.
    pub fn to_invoker_params(&self, attempt_timeout: Duration) -> InvokerParams {
        InvokerParams::default()
            .with_max_attempts(self.max_attempts)
            .with_backoff(
                Duration::from_millis(self.backoff_base_ms),
                Duration::from_millis(self.backoff_max_ms),
            )
            .with_attempt_timeout(attempt_timeout)
            .with_rate_limit(
                self.rate_limit_calls,
                Duration::from_secs(self.rate_limit_window_seconds),
                Duration::from_secs(self.rate_limit_max_wait_seconds),
            )
            .with_history_exchanges(self.history_exchanges)
    }
}
