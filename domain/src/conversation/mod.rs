//! Conversation history.
//!
//! - [`turn::ConversationTurn`]: one role-tagged message
//! - [`context::ConversationContext`]: bounded in-memory history per conversation

pub mod context;
pub mod turn;

pub use context::{ContextLimits, ConversationContext};
pub use turn::{ConversationTurn, Role};
