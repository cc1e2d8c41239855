//! Keyword-based topic guard.
//!
//! A question is in-domain when it mentions any domain keyword, or when a
//! generic medical term appears together with a partial disease mention.
//! Ambiguous phrasing falls out of domain: a polite redirect is cheap, an
//! off-topic model call is not.

use super::vocabulary::{TermMatch, Vocabulary};

/// Result of [`TopicGuard::classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicClassification {
    pub in_domain: bool,
    /// The vocabulary entry that decided the classification, if any.
    pub matched: Option<String>,
}

impl TopicClassification {
    fn in_domain(term: &str) -> Self {
        Self {
            in_domain: true,
            matched: Some(term.to_string()),
        }
    }

    fn out_of_domain() -> Self {
        Self {
            in_domain: false,
            matched: None,
        }
    }
}

/// Pure, deterministic pre-filter deciding whether a question is about SMA.
#[derive(Debug, Clone, Default)]
pub struct TopicGuard {
    vocabulary: Vocabulary,
}

impl TopicGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vocabulary(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Classify already-validated question text.
    pub fn classify(&self, text: &str) -> TopicClassification {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();
        let mentions = |term: &str| match TermMatch::of(term) {
            TermMatch::Phrase => lowered.contains(term),
            kind => tokens.iter().any(|token| kind.token_matches(term, token)),
        };

        if let Some(keyword) = self.vocabulary.keywords().iter().find(|k| mentions(k)) {
            return TopicClassification::in_domain(keyword);
        }

        let disease = self
            .vocabulary
            .disease_mentions()
            .iter()
            .find(|d| mentions(d));
        if let Some(disease) = disease
            && self.vocabulary.medical_terms().iter().any(|t| mentions(t))
        {
            return TopicClassification::in_domain(disease);
        }

        TopicClassification::out_of_domain()
    }

    pub fn is_in_domain(&self, text: &str) -> bool {
        self.classify(text).in_domain
    }
}
