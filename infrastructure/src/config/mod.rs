//! Configuration file loading for sma-assistant
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SMA_`-prefixed environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./sma.toml` or `./.sma.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/sma-assistant/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfidenceConfig, FileConfig, FileHistoryConfig,
    FileInvokerConfig, FileLoggingConfig, FilePromptConfig, FileProviderConfig, FileServerConfig,
};
pub use loader::ConfigLoader;
