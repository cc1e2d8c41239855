//! Domain layer for sma-assistant
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Topic gating
//!
//! [`TopicGuard`] decides whether a [`Question`] is about Spinal Muscular
//! Atrophy before any model call is made.
//!
//! ## Coercion
//!
//! [`ResponseCoercer`] turns free-form model output into an answer and a
//! [`Confidence`], grading how reliably the structure was extracted.
//!
//! ## History
//!
//! [`ConversationContext`] keeps a bounded, in-memory list of
//! [`ConversationTurn`]s per [`ConversationId`].

pub mod answer;
pub mod coercion;
pub mod conversation;
pub mod core;
pub mod prompt;
pub mod topic;
pub mod util;

// Re-export commonly used types
pub use answer::{
    confidence::{Confidence, ConfidenceLevel},
    entities::{Answer, AnswerOrigin},
};
pub use coercion::{CoercionOutcome, CoercionPolicy, Extraction, ResponseCoercer};
pub use conversation::{ContextLimits, ConversationContext, ConversationTurn, Role};
pub use core::{
    error::DomainError,
    question::{ConversationId, MAX_QUESTION_CHARS, Question},
};
pub use prompt::{PromptTemplate, SystemPrompt};
pub use topic::{TopicClassification, TopicGuard, Vocabulary};
