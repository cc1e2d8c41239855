//! Bounded in-memory conversation history.
//!
//! Two caps bound memory:
//! - per conversation, at most `max_turns` turns; the oldest turn is evicted first
//! - at most `max_conversations` conversations; the one appended to least
//!   recently is evicted first
//!
//! History is best-effort and lives only as long as the process.

use super::turn::ConversationTurn;
use crate::core::question::ConversationId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Caps applied by [`ConversationContext`]. Both are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextLimits {
    pub max_turns: usize,
    pub max_conversations: usize,
}

impl Default for ContextLimits {
    fn default() -> Self {
        Self {
            max_turns: 100,
            max_conversations: 10_000,
        }
    }
}

#[derive(Debug, Default)]
struct Bucket {
    turns: VecDeque<ConversationTurn>,
    last_touched: u64,
}

#[derive(Debug, Default)]
struct Store {
    buckets: HashMap<ConversationId, Bucket>,
    clock: u64,
}

/// Thread-safe conversation history shared across requests.
///
/// All mutation goes through one lock, so appends to the same conversation
/// never interleave.
#[derive(Debug, Default)]
pub struct ConversationContext {
    limits: ContextLimits,
    store: Mutex<Store>,
}

impl ConversationContext {
    pub fn new(limits: ContextLimits) -> Self {
        Self {
            limits: ContextLimits {
                max_turns: limits.max_turns.max(1),
                max_conversations: limits.max_conversations.max(1),
            },
            store: Mutex::new(Store::default()),
        }
    }

    pub fn limits(&self) -> ContextLimits {
        self.limits
    }

    // History is a cache; a panic in another holder must not disable it.
    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append one turn.
    pub fn append(&self, id: &ConversationId, turn: ConversationTurn) {
        self.append_all(id, [turn]);
    }

    /// Append a user turn and the assistant reply under a single lock.
    pub fn append_exchange(
        &self,
        id: &ConversationId,
        user: ConversationTurn,
        assistant: ConversationTurn,
    ) {
        self.append_all(id, [user, assistant]);
    }

    fn append_all(&self, id: &ConversationId, turns: impl IntoIterator<Item = ConversationTurn>) {
        let mut store = self.lock();
        store.clock += 1;
        let now = store.clock;

        if !store.buckets.contains_key(id) && store.buckets.len() >= self.limits.max_conversations
        {
            let oldest = store
                .buckets
                .iter()
                .min_by_key(|(_, bucket)| bucket.last_touched)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                store.buckets.remove(&oldest);
            }
        }

        let bucket = store.buckets.entry(id.clone()).or_default();
        bucket.last_touched = now;
        for turn in turns {
            bucket.turns.push_back(turn);
            while bucket.turns.len() > self.limits.max_turns {
                bucket.turns.pop_front();
            }
        }
    }

    /// All retained turns of a conversation, most recent last.
    pub fn get(&self, id: &ConversationId) -> Vec<ConversationTurn> {
        self.lock()
            .buckets
            .get(id)
            .map(|bucket| bucket.turns.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// The last `n` turns of a conversation, most recent last.
    pub fn recent(&self, id: &ConversationId, n: usize) -> Vec<ConversationTurn> {
        self.lock()
            .buckets
            .get(id)
            .map(|bucket| {
                let skip = bucket.turns.len().saturating_sub(n);
                bucket.turns.iter().skip(skip).cloned().collect()
            })
            .unwrap_or_default()
    }

    /// Number of conversations currently held.
    pub fn len(&self) -> usize {
        self.lock().buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self, id: &ConversationId) {
        self.lock().buckets.remove(id);
    }
}
