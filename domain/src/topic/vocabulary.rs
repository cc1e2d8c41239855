//! Keyword vocabulary for topic gating

use serde::{Deserialize, Serialize};

/// Single-word entries up to this length are matched as acronyms.
const ACRONYM_MAX_CHARS: usize = 4;

/// Endings accepted after a single-word entry (`treatments`, `diagnosed`).
const WORD_SUFFIXES: [&str; 6] = ["", "s", "es", "d", "ed", "ing"];

/// How a vocabulary entry is compared with question text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TermMatch {
    /// Short entry such as `sma`: a token equal to it, or followed only by
    /// digits (`sma2`) or a plural `s` (`smas`).
    Acronym,
    /// Single word: a token equal to it or a plain inflection of it.
    Word,
    /// Entry with spaces or punctuation: substring of the lowered text.
    Phrase,
}

impl TermMatch {
    pub(super) fn of(term: &str) -> Self {
        if !term.chars().all(char::is_alphanumeric) {
            Self::Phrase
        } else if term.chars().count() <= ACRONYM_MAX_CHARS {
            Self::Acronym
        } else {
            Self::Word
        }
    }

    /// Whether a single lowercase `token` counts as a mention of `term`.
    pub(super) fn token_matches(self, term: &str, token: &str) -> bool {
        match self {
            Self::Acronym => token.strip_prefix(term).is_some_and(|rest| {
                rest.is_empty() || rest == "s" || rest.bytes().all(|b| b.is_ascii_digit())
            }),
            Self::Word => {
                if let Some(rest) = token.strip_prefix(term) {
                    return WORD_SUFFIXES.contains(&rest);
                }
                if let Some(stem) = term.strip_suffix('y') {
                    return token.strip_prefix(stem) == Some("ies");
                }
                if let Some(stem) = term.strip_suffix('e') {
                    return token.strip_prefix(stem) == Some("ing");
                }
                false
            }
            Self::Phrase => token == term,
        }
    }
}

/// Keyword lists used by [`TopicGuard`](super::TopicGuard).
///
/// - `keywords`: any match makes a question in-domain
/// - `disease_mentions`: partial references to the disease
/// - `medical_terms`: generic terms that count only next to a disease mention
///
/// All entries are stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    keywords: Vec<String>,
    disease_mentions: Vec<String>,
    medical_terms: Vec<String>,
}

impl Vocabulary {
    pub fn new(
        keywords: impl IntoIterator<Item = impl Into<String>>,
        disease_mentions: impl IntoIterator<Item = impl Into<String>>,
        medical_terms: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        fn lower(items: impl IntoIterator<Item = impl Into<String>>) -> Vec<String> {
            items
                .into_iter()
                .map(|s| s.into().trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect()
        }
        Self {
            keywords: lower(keywords),
            disease_mentions: lower(disease_mentions),
            medical_terms: lower(medical_terms),
        }
    }

    /// Vocabulary for Spinal Muscular Atrophy.
    pub fn sma() -> Self {
        Self::new(
            [
                "sma",
                "spinal muscular atrophy",
                "smn1",
                "smn2",
                "survival motor neuron",
                "motor neuron",
                "anterior horn",
                "motor unit",
                "muscle atrophy",
                "muscle weakness",
                "hypotonia",
                "werdnig-hoffmann",
                "kugelberg-welander",
                "spinraza",
                "nusinersen",
                "zolgensma",
                "onasemnogene",
                "risdiplam",
                "evrysdi",
            ],
            ["muscular atrophy", "spinal muscular", "spinal atrophy"],
            [
                "treatment",
                "therapy",
                "symptom",
                "diagnosis",
                "diagnose",
                "prognosis",
                "medication",
                "drug",
                "gene",
                "genetic",
                "disease",
                "type",
                "cure",
                "life expectancy",
            ],
        )
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn disease_mentions(&self) -> &[String] {
        &self.disease_mentions
    }

    pub fn medical_terms(&self) -> &[String] {
        &self.medical_terms
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::sma()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_lowercased_and_trimmed() {
        let vocab = Vocabulary::new([" SMA "], ["Muscular Atrophy"], ["", "Therapy"]);
        assert_eq!(vocab.keywords(), ["sma"]);
        assert_eq!(vocab.disease_mentions(), ["muscular atrophy"]);
        assert_eq!(vocab.medical_terms(), ["therapy"]);
    }

    #[test]
    fn test_term_match_kind() {
        assert_eq!(TermMatch::of("sma"), TermMatch::Acronym);
        assert_eq!(TermMatch::of("smn1"), TermMatch::Acronym);
        assert_eq!(TermMatch::of("spinraza"), TermMatch::Word);
        assert_eq!(TermMatch::of("motor neuron"), TermMatch::Phrase);
        assert_eq!(TermMatch::of("werdnig-hoffmann"), TermMatch::Phrase);
    }

    #[test]
    fn test_acronym_accepts_digits_and_plural() {
        let m = TermMatch::Acronym;
        for token in ["sma", "sma1", "sma4", "smas"] {
            assert!(m.token_matches("sma", token), "{token}");
        }
        for token in ["smart", "smallest", "smass", "sm", "xsma"] {
            assert!(!m.token_matches("sma", token), "{token}");
        }
        assert!(m.token_matches("gene", "genes"));
        assert!(!m.token_matches("gene", "general"));
        assert!(!m.token_matches("type", "prototype"));
        assert!(!m.token_matches("cure", "secure"));
    }

    #[test]
    fn test_word_accepts_inflections_only() {
        let m = TermMatch::Word;
        assert!(m.token_matches("treatment", "treatments"));
        assert!(m.token_matches("therapy", "therapies"));
        assert!(m.token_matches("diagnose", "diagnosed"));
        assert!(m.token_matches("diagnose", "diagnosing"));
        assert!(m.token_matches("symptom", "symptoms"));
        assert!(!m.token_matches("therapy", "psychotherapy"));
        assert!(!m.token_matches("genetic", "genetically"));
        assert!(!m.token_matches("disease", "diseaseless"));
    }
}
