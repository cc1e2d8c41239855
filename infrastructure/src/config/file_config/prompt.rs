//! Prompt configuration from TOML (`[prompt]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePromptConfig {
    /// File holding the system prompt. Missing or empty means built-in default.
    pub system_prompt_file: PathBuf,
}

impl Default for FilePromptConfig {
    fn default() -> Self {
        Self {
            system_prompt_file: PathBuf::from("system_prompt.txt"),
        }
    }
}
