//! System prompt loading from the local file system.

mod loader;

pub use loader::{PromptLoadError, SystemPromptLoader};
