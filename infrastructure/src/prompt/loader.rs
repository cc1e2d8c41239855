//! Local file system system-prompt loader
//!
//! The prompt is read once at startup. A missing or blank file is not an
//! error: the built-in default prompt is used and a warning is logged.

use sma_domain::SystemPrompt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum PromptLoadError {
    #[error("Failed to read system prompt {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Reads the system prompt file.
#[derive(Debug, Clone, Default)]
pub struct SystemPromptLoader;

impl SystemPromptLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load the prompt at `path`, falling back to the default when the file
    /// is missing or blank.
    pub fn load(&self, path: &Path) -> Result<SystemPrompt, PromptLoadError> {
        match fs::read_to_string(path) {
            Ok(content) if content.trim().is_empty() => {
                warn!("{} is empty, using default prompt", path.display());
                Ok(SystemPrompt::default())
            }
            Ok(content) => {
                debug!("Loaded system prompt from {} ({} bytes)", path.display(), content.len());
                Ok(SystemPrompt::new(content))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("{} not found, using default prompt", path.display());
                Ok(SystemPrompt::default())
            }
            Err(source) => Err(PromptLoadError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
