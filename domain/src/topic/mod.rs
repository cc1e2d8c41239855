//! Topic gating.
//!
//! [`guard::TopicGuard`] decides, without calling the model, whether a
//! question is about SMA. [`vocabulary::Vocabulary`] holds the keyword lists
//! it matches against.

pub mod guard;
pub mod vocabulary;

pub use guard::{TopicClassification, TopicGuard};
pub use vocabulary::Vocabulary;
