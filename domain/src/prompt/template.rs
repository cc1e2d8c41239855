//! Prompt templates for the answer flow

use serde::{Deserialize, Serialize};

/// Templates for generating prompts
pub struct PromptTemplate;

impl PromptTemplate {
    /// Built-in system prompt, used when no prompt file is available
    pub fn default_system() -> &'static str {
        r#"You are a careful medical information assistant specialised in Spinal Muscular Atrophy (SMA).
Only answer questions about SMA: its types, genetics (SMN1, SMN2), symptoms, diagnosis, treatments
(such as nusinersen/Spinraza, onasemnogene abeparvovec/Zolgensma, risdiplam/Evrysdi), care and management.
If a question is not about SMA, say that you can only help with SMA.
Never give a personal diagnosis; recommend consulting a healthcare professional where appropriate.

Respond ONLY with a single JSON object, no prose around it:
{"answer": "<your answer>", "confidence": <number between 0.0 and 1.0>}"#
    }
}

/// Opaque instruction text prepended to every model call (Value Object)
///
/// Loaded once at start-up and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemPrompt(String);

impl SystemPrompt {
    /// Wrap prompt text; blank text falls back to [`PromptTemplate::default_system`].
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            Self::default()
        } else {
            Self(text.trim().to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SystemPrompt {
    fn default() -> Self {
        Self(PromptTemplate::default_system().to_string())
    }
}
