//! Question value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// Maximum question length, counted in characters after trimming.
pub const MAX_QUESTION_CHARS: usize = 1000;

/// Maximum conversation id length.
pub const MAX_CONVERSATION_ID_CHARS: usize = 128;

/// Identifier grouping the turns of a single conversation (Value Object)
///
/// Only ASCII letters, digits, `_` and `-` are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConversationId(String);

impl ConversationId {
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DomainError::InvalidConversationId(
                "conversation id cannot be empty".to_string(),
            ));
        }
        if raw.chars().count() > MAX_CONVERSATION_ID_CHARS {
            return Err(DomainError::InvalidConversationId(format!(
                "conversation id exceeds {} characters",
                MAX_CONVERSATION_ID_CHARS
            )));
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(DomainError::InvalidConversationId(format!(
                "'{}' may only contain letters, digits, '_' and '-'",
                raw
            )));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ConversationId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ConversationId> for String {
    fn from(id: ConversationId) -> Self {
        id.0
    }
}

/// A question about SMA (Value Object)
///
/// Holds trimmed text of 1 to [`MAX_QUESTION_CHARS`] characters and an
/// optional [`ConversationId`]. Built once at the system boundary and
/// consumed by the answer pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    content: String,
    conversation_id: Option<ConversationId>,
}

impl Question {
    /// Try to create a new question from raw boundary input.
    pub fn try_new(content: impl AsRef<str>) -> Result<Self, DomainError> {
        let content = content.as_ref().trim();
        if content.is_empty() {
            return Err(DomainError::InvalidQuestion(
                "message cannot be empty or only whitespace".to_string(),
            ));
        }
        let chars = content.chars().count();
        if chars > MAX_QUESTION_CHARS {
            return Err(DomainError::InvalidQuestion(format!(
                "message is {} characters, maximum is {}",
                chars, MAX_QUESTION_CHARS
            )));
        }
        Ok(Self {
            content: content.to_string(),
            conversation_id: None,
        })
    }

    /// Parse both the text and an optional raw conversation id.
    pub fn parse(
        content: impl AsRef<str>,
        conversation_id: Option<&str>,
    ) -> Result<Self, DomainError> {
        let question = Self::try_new(content)?;
        match conversation_id {
            Some(raw) => Ok(question.with_conversation(ConversationId::parse(raw)?)),
            None => Ok(question),
        }
    }

    pub fn with_conversation(mut self, id: ConversationId) -> Self {
        self.conversation_id = Some(id);
        self
    }

    /// Get the (trimmed) question content
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn conversation_id(&self) -> Option<&ConversationId> {
        self.conversation_id.as_ref()
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}
