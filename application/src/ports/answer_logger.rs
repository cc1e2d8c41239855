//! Port for structured answer logging.
//!
//! Defines the [`AnswerLogger`] trait for recording every answer the
//! pipeline produces (question, answer, confidence, origin, latency) to a
//! structured transcript.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures a machine-readable
//! transcript (JSONL).

use serde_json::Value;

/// A structured answer event for logging.
pub struct AnswerEvent {
    /// Event type identifier (e.g., "answer", "redirect", "fallback").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl AnswerEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging answer events to a structured log.
///
/// `log` is synchronous and infallible; implementations swallow their own
/// write errors so logging can never change an answer.
pub trait AnswerLogger: Send + Sync {
    fn log(&self, event: AnswerEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoAnswerLogger;

impl AnswerLogger for NoAnswerLogger {
    fn log(&self, _event: AnswerEvent) {}
}
