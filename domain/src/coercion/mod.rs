//! Reply coercion.
//!
//! Turns free-form model output into an answer/confidence pair. The model is
//! asked for `{"answer": ..., "confidence": ...}` but does not always comply,
//! so the result is graded:
//!
//! | Tier | Condition | Confidence |
//! |------|-----------|------------|
//! | [`Extraction::Trusted`] | object found, confidence numeric in [0, 1] | as reported |
//! | [`Extraction::Suspect`] | object found, confidence missing or invalid | [`CoercionPolicy::suspect`] |
//! | [`Extraction::Unstructured`] | no object, whole text used | [`CoercionPolicy::unstructured`] |
//! | [`CoercionOutcome::Empty`] | blank reply | none |

pub mod coercer;
pub mod extract;

pub use coercer::{CoercionOutcome, CoercionPolicy, Extraction, ResponseCoercer};
pub use extract::{StructuredReply, find_structured_reply};
