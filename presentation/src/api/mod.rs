//! HTTP API (axum).

pub mod error;
pub mod handlers;
pub mod router;
pub mod types;

pub use error::ApiError;
pub use router::{api_router, serve};
pub use types::{AnswerBody, ApiState, ChatRequest};
