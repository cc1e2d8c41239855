//! Request and response bodies, and shared handler state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sma_application::AnswerPipeline;
use sma_domain::Answer;
use std::sync::Arc;

/// State shared by all handlers.
#[derive(Clone)]
pub struct ApiState {
    pub pipeline: Arc<AnswerPipeline>,
}

impl ApiState {
    pub fn new(pipeline: Arc<AnswerPipeline>) -> Self {
        Self { pipeline }
    }
}

/// `POST /api/chat` body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

/// Wire form of an [`Answer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerBody {
    pub answer: String,
    pub confidence: f64,
    pub confidence_level: String,
    pub timestamp: DateTime<Utc>,
    pub response_time_ms: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
}

impl From<&Answer> for AnswerBody {
    fn from(answer: &Answer) -> Self {
        Self {
            answer: answer.text().to_string(),
            confidence: answer.confidence().value(),
            confidence_level: answer.confidence_level().as_str().to_string(),
            timestamp: answer.timestamp(),
            response_time_ms: answer.response_time_ms(),
            sources: answer.sources().to_vec(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// `GET /` service description.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub health: &'static str,
    pub chat: &'static str,
}
