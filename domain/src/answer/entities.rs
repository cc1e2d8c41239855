//! Answer entity

use super::confidence::{Confidence, ConfidenceLevel};
use crate::coercion::Extraction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How an [`Answer`] came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "extraction")]
pub enum AnswerOrigin {
    /// Produced by the model, with the extraction tier of its reply
    Model(Extraction),
    /// The question was out of domain; the model was never called
    Redirect,
    /// The model call failed or returned nothing usable
    Fallback,
}

impl AnswerOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerOrigin::Model(Extraction::Trusted) => "model_trusted",
            AnswerOrigin::Model(Extraction::Suspect) => "model_suspect",
            AnswerOrigin::Model(Extraction::Unstructured) => "model_unstructured",
            AnswerOrigin::Redirect => "redirect",
            AnswerOrigin::Fallback => "fallback",
        }
    }

    pub fn is_model(&self) -> bool {
        matches!(self, AnswerOrigin::Model(_))
    }
}

/// The answer to one question (Entity)
///
/// Immutable once built. The text is never empty and the confidence is
/// always within range.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    text: String,
    confidence: Confidence,
    latency: Duration,
    timestamp: DateTime<Utc>,
    sources: Vec<String>,
    origin: AnswerOrigin,
}

impl Answer {
    /// Build an answer.
    ///
    /// Callers guarantee `text` is non-empty after trimming; the pipeline
    /// only passes coerced replies or the fixed redirect/fallback texts.
    pub fn new(
        text: impl Into<String>,
        confidence: Confidence,
        latency: Duration,
        origin: AnswerOrigin,
    ) -> Self {
        let text = text.into();
        debug_assert!(!text.trim().is_empty(), "Answer text cannot be empty");
        Self {
            text,
            confidence,
            latency,
            timestamp: Utc::now(),
            sources: Vec::new(),
            origin,
        }
    }

    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = sources;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        self.confidence.level()
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Latency in whole milliseconds
    pub fn response_time_ms(&self) -> u64 {
        u64::try_from(self.latency.as_millis()).unwrap_or(u64::MAX)
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn origin(&self) -> AnswerOrigin {
        self.origin
    }
}
