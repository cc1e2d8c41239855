//! Confidence configuration from TOML (`[confidence]` section)

use serde::{Deserialize, Serialize};

/// Fixed confidences assigned when the model's own score is missing or
/// unusable, and for redirect/fallback answers. All must lie in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfidenceConfig {
    pub suspect: f64,
    pub unstructured: f64,
    pub redirect: f64,
    pub fallback: f64,
}

impl Default for FileConfidenceConfig {
    fn default() -> Self {
        Self {
            suspect: 0.7,
            unstructured: 0.6,
            redirect: 0.0,
            fallback: 0.0,
        }
    }
}

impl FileConfidenceConfig {
    /// `(field, value)` pairs, for validation and error messages.
    pub fn fields(&self) -> [(&'static str, f64); 4] {
        [
            ("confidence.suspect", self.suspect),
            ("confidence.unstructured", self.unstructured),
            ("confidence.redirect", self.redirect),
            ("confidence.fallback", self.fallback),
        ]
    }
}
