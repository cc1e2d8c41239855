//! Presentation layer for sma-assistant
//!
//! This crate contains the CLI definition, the HTTP API, console output
//! formatting and progress indication.

pub mod api;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use api::{AnswerBody, ApiState, api_router, serve};
pub use cli::commands::{Cli, Command};
pub use output::console::ConsoleFormatter;
pub use progress::spinner::AnswerSpinner;
