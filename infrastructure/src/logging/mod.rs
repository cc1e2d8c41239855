//! Logging infrastructure: the JSONL answer transcript.
//!
//! Provides [`JsonlAnswerLogger`], a JSONL file writer that implements
//! the [`AnswerLogger`](sma_application::AnswerLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlAnswerLogger;
