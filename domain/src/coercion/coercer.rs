//! Graded coercion of model replies.

use super::extract::find_structured_reply;
use crate::answer::confidence::Confidence;
use serde::{Deserialize, Serialize};

/// How faithfully the answer was extracted from the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extraction {
    Trusted,
    Suspect,
    Unstructured,
}

/// Confidence assigned when the reply's own score cannot be used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoercionPolicy {
    /// Structured object found but its confidence is missing or invalid
    pub suspect: Confidence,
    /// No structured object; the whole text is the answer
    pub unstructured: Confidence,
}

impl Default for CoercionPolicy {
    fn default() -> Self {
        Self {
            suspect: Confidence::saturating(0.7),
            unstructured: Confidence::saturating(0.6),
        }
    }
}

/// Tagged result of [`ResponseCoercer::coerce`].
#[derive(Debug, Clone, PartialEq)]
pub enum CoercionOutcome {
    Trusted { answer: String, confidence: Confidence },
    Suspect { answer: String, confidence: Confidence },
    Unstructured { answer: String, confidence: Confidence },
    /// The reply had no usable content
    Empty,
}

impl CoercionOutcome {
    pub fn extraction(&self) -> Option<Extraction> {
        match self {
            CoercionOutcome::Trusted { .. } => Some(Extraction::Trusted),
            CoercionOutcome::Suspect { .. } => Some(Extraction::Suspect),
            CoercionOutcome::Unstructured { .. } => Some(Extraction::Unstructured),
            CoercionOutcome::Empty => None,
        }
    }

    pub fn answer(&self) -> Option<&str> {
        match self {
            CoercionOutcome::Trusted { answer, .. }
            | CoercionOutcome::Suspect { answer, .. }
            | CoercionOutcome::Unstructured { answer, .. } => Some(answer),
            CoercionOutcome::Empty => None,
        }
    }

    pub fn confidence(&self) -> Option<Confidence> {
        match self {
            CoercionOutcome::Trusted { confidence, .. }
            | CoercionOutcome::Suspect { confidence, .. }
            | CoercionOutcome::Unstructured { confidence, .. } => Some(*confidence),
            CoercionOutcome::Empty => None,
        }
    }

    /// Split into `(answer, confidence, extraction)`, or `None` when empty.
    pub fn into_parts(self) -> Option<(String, Confidence, Extraction)> {
        match self {
            CoercionOutcome::Trusted { answer, confidence } => {
                Some((answer, confidence, Extraction::Trusted))
            }
            CoercionOutcome::Suspect { answer, confidence } => {
                Some((answer, confidence, Extraction::Suspect))
            }
            CoercionOutcome::Unstructured { answer, confidence } => {
                Some((answer, confidence, Extraction::Unstructured))
            }
            CoercionOutcome::Empty => None,
        }
    }
}

/// Pure coercer from raw model text to a graded answer. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseCoercer {
    policy: CoercionPolicy,
}

impl ResponseCoercer {
    pub fn new(policy: CoercionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &CoercionPolicy {
        &self.policy
    }

    pub fn coerce(&self, raw: &str) -> CoercionOutcome {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CoercionOutcome::Empty;
        }

        let Some(reply) = find_structured_reply(trimmed) else {
            return CoercionOutcome::Unstructured {
                answer: trimmed.to_string(),
                confidence: self.policy.unstructured,
            };
        };

        let reported = reply
            .confidence
            .as_ref()
            .and_then(|v| v.as_f64())
            .and_then(|v| Confidence::new(v).ok());

        match reported {
            Some(confidence) => CoercionOutcome::Trusted {
                answer: reply.answer,
                confidence,
            },
            None => CoercionOutcome::Suspect {
                answer: reply.answer,
                confidence: self.policy.suspect,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coerce(raw: &str) -> CoercionOutcome {
        ResponseCoercer::default().coerce(raw)
    }

    #[test]
    fn test_well_formed_reply_is_trusted() {
        let outcome = coerce(r#"{"answer":"X","confidence":0.8}"#);
        assert_eq!(outcome.extraction(), Some(Extraction::Trusted));
        assert_eq!(outcome.answer(), Some("X"));
        assert_eq!(outcome.confidence().unwrap().value(), 0.8);
    }

    #[test]
    fn test_trusted_is_idempotent() {
        let first = coerce(r#"{"answer":"X","confidence":0.8}"#);
        let (answer, confidence, _) = first.clone().into_parts().unwrap();
        let again = coerce(&format!(
            r#"{{"answer":"{}","confidence":{}}}"#,
            answer,
            confidence.value()
        ));
        assert_eq!(first, again);
    }

    #[test]
    fn test_plain_text_is_unstructured() {
        let outcome = coerce("hello");
        assert_eq!(
            outcome,
            CoercionOutcome::Unstructured {
                answer: "hello".to_string(),
                confidence: Confidence::saturating(0.6),
            }
        );
    }

    #[test]
    fn test_out_of_range_confidence_is_suspect() {
        let outcome = coerce(r#"{"answer":"X","confidence":5}"#);
        assert_eq!(outcome.extraction(), Some(Extraction::Suspect));
        assert_eq!(outcome.answer(), Some("X"));
        assert_eq!(outcome.confidence().unwrap().value(), 0.7);
    }

    #[test]
    fn test_missing_or_non_numeric_confidence_is_suspect() {
        for raw in [
            r#"{"answer":"X"}"#,
            r#"{"answer":"X","confidence":"high"}"#,
            r#"{"answer":"X","confidence":"0.8"}"#,
            r#"{"answer":"X","confidence":null}"#,
            r#"{"answer":"X","confidence":-0.1}"#,
        ] {
            let outcome = coerce(raw);
            assert_eq!(outcome.extraction(), Some(Extraction::Suspect), "{raw}");
            assert_eq!(outcome.confidence().unwrap().value(), 0.7, "{raw}");
        }
    }

    #[test]
    fn test_boundary_confidences_are_trusted() {
        assert_eq!(
            coerce(r#"{"answer":"X","confidence":0}"#).confidence().unwrap().value(),
            0.0
        );
        assert_eq!(
            coerce(r#"{"answer":"X","confidence":1}"#).confidence().unwrap().value(),
            1.0
        );
    }

    #[test]
    fn test_blank_reply_is_empty() {
        assert_eq!(coerce(""), CoercionOutcome::Empty);
        assert_eq!(coerce("  \n\t "), CoercionOutcome::Empty);
        assert!(CoercionOutcome::Empty.into_parts().is_none());
    }

    #[test]
    fn test_unstructured_uses_trimmed_whole_text() {
        let outcome = coerce("  SMA is caused by SMN1 loss. \n");
        assert_eq!(outcome.answer(), Some("SMA is caused by SMN1 loss."));
    }

    #[test]
    fn test_custom_policy() {
        let coercer = ResponseCoercer::new(CoercionPolicy {
            suspect: Confidence::saturating(0.4),
            unstructured: Confidence::saturating(0.2),
        });
        assert_eq!(coercer.coerce("plain").confidence().unwrap().value(), 0.2);
        assert_eq!(
            coercer.coerce(r#"{"answer":"a"}"#).confidence().unwrap().value(),
            0.4
        );
    }

    #[test]
    fn test_fenced_reply_with_prose() {
        let raw = "Here you go:\n```json\n{\"answer\": \"SMA has four main types.\", \"confidence\": 0.92}\n```";
        let (answer, confidence, extraction) = coerce(raw).into_parts().unwrap();
        assert_eq!(answer, "SMA has four main types.");
        assert_eq!(confidence.value(), 0.92);
        assert_eq!(extraction, Extraction::Trusted);
    }
}
