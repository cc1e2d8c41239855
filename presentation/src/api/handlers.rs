//! Endpoint handlers.

use axum::Json;
use axum::extract::State;
use sma_domain::Question;
use tracing::info;

use crate::api::error::ApiError;
use crate::api::types::{AnswerBody, ApiState, ChatRequest, HealthResponse, ServiceInfo};

/// `GET /`
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "SMA Medical Assistant API",
        version: env!("CARGO_PKG_VERSION"),
        health: "/api/health",
        chat: "/api/chat",
    })
}

/// `GET /api/health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: chrono::Utc::now(),
    })
}

/// `POST /api/chat`
///
/// Input that fails validation is rejected with 422; everything else gets
/// an answer, possibly the redirect or the apology.
pub async fn chat(
    State(state): State<ApiState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<AnswerBody>, ApiError> {
    let question = Question::parse(&request.message, request.conversation_id.as_deref())?;
    info!(
        conversation = request.conversation_id.as_deref().unwrap_or("-"),
        "Chat request received"
    );

    let answer = state.pipeline.answer(&question).await;
    Ok(Json(AnswerBody::from(&answer)))
}
