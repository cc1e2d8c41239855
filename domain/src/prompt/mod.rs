//! Prompt domain
//!
//! The system prompt sent with every model call, and the built-in default
//! used when none is configured.

mod template;

pub use template::{PromptTemplate, SystemPrompt};
