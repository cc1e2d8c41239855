//! History configuration from TOML (`[history]` section)

use serde::{Deserialize, Serialize};
use sma_domain::ContextLimits;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHistoryConfig {
    /// Turns kept per conversation
    pub max_turns: usize,
    /// Conversations kept in memory
    pub max_conversations: usize,
}

impl Default for FileHistoryConfig {
    fn default() -> Self {
        let limits = ContextLimits::default();
        Self {
            max_turns: limits.max_turns,
            max_conversations: limits.max_conversations,
        }
    }
}

impl FileHistoryConfig {
    pub fn to_context_limits(&self) -> ContextLimits {
        ContextLimits {
            max_turns: self.max_turns,
            max_conversations: self.max_conversations,
        }
    }
}
