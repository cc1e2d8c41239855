//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Invalid conversation id: {0}")]
    InvalidConversationId(String),

    #[error("Confidence out of range: {0}")]
    ConfidenceOutOfRange(String),
}

impl DomainError {
    /// Check if this error was caused by the question text itself
    pub fn is_question_error(&self) -> bool {
        matches!(self, DomainError::InvalidQuestion(_))
    }
}
