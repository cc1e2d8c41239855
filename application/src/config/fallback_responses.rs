//! Fixed answers for the redirect and fallback paths.

use serde::{Deserialize, Serialize};
use sma_domain::Confidence;

pub const REDIRECT_TEXT: &str = "I can only provide information about Spinal Muscular Atrophy (SMA). Please ask a question related to SMA, its symptoms, treatments, or management.";

pub const FALLBACK_TEXT: &str = "I apologize, but I'm having trouble processing your request right now. Please try rephrasing your question about Spinal Muscular Atrophy (SMA), or contact a healthcare professional for immediate assistance.";

/// Texts and confidences used when the model is not (successfully) consulted.
///
/// A redirect is a confident refusal of an off-topic question; a fallback
/// is an apology after a failed call. Both default to confidence 0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackResponses {
    pub redirect_text: String,
    pub redirect_confidence: Confidence,
    pub fallback_text: String,
    pub fallback_confidence: Confidence,
}

impl Default for FallbackResponses {
    fn default() -> Self {
        Self {
            redirect_text: REDIRECT_TEXT.to_string(),
            redirect_confidence: Confidence::ZERO,
            fallback_text: FALLBACK_TEXT.to_string(),
            fallback_confidence: Confidence::ZERO,
        }
    }
}
