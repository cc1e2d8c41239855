//! Application layer for sma-assistant
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{FallbackResponses, InvokerParams, PipelineConfig};
pub use ports::{
    answer_logger::{AnswerEvent, AnswerLogger, NoAnswerLogger},
    llm_gateway::{CompletionRequest, ErrorClass, GatewayError, LlmGateway},
};
pub use use_cases::answer_question::{AnswerPipeline, PipelineStage};
pub use use_cases::invoke_llm::{
    InvokeError, LlmInvoker, RateLimitError, RetryPolicy, SlidingWindowLimiter,
};
