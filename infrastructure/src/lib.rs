//! Infrastructure layer for sma-assistant
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the Gemini gateway, configuration file
//! loading, system prompt loading and the JSONL answer transcript.

pub mod config;
pub mod logging;
pub mod prompt;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use logging::JsonlAnswerLogger;
pub use prompt::{PromptLoadError, SystemPromptLoader};
pub use providers::{GeminiGateway, GeminiSettings};
