//! Answers returned to the caller.
//!
//! - [`confidence::Confidence`]: a score in the closed interval [0.0, 1.0]
//! - [`confidence::ConfidenceLevel`]: the five display tiers derived from it
//! - [`entities::Answer`]: the finished, immutable answer

pub mod confidence;
pub mod entities;
