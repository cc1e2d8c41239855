//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Filter directive overriding `-v` (e.g. "info" or "sma_application=debug")
    pub level: Option<String>,
    /// Directory for daily rolling log files
    pub dir: Option<PathBuf>,
    /// JSONL answer transcript path
    pub transcript: Option<PathBuf>,
}
