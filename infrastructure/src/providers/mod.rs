//! Model provider adapters implementing [`LlmGateway`](sma_application::LlmGateway).

pub mod gemini;

pub use gemini::{GeminiGateway, GeminiSettings};
