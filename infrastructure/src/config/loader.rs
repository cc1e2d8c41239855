//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["sma.toml", ".sma.toml"];
const ENV_PREFIX: &str = "SMA_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables `SMA_<SECTION>__<KEY>` (e.g. `SMA_SERVER__PORT`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./sma.toml` or `./.sma.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/sma-assistant/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(Self::global_config_path(), Path::new("."), config_path)
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn figment(global: Option<PathBuf>, project_dir: &Path, config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = global
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        if let Some(path) = Self::find_project_config(project_dir) {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/sma-assistant/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("sma-assistant").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        Self::find_project_config(Path::new("."))
    }

    fn find_project_config(dir: &Path) -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Describe the config sources being used, highest priority first.
    pub fn describe_sources(config_path: Option<&Path>) -> Vec<String> {
        let mut lines = vec![format!("  [ENV  ] Variables: {ENV_PREFIX}<SECTION>__<KEY>")];

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            lines.push(format!("  [{mark}] Explicit: {}", path.display()));
        }

        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
            None => lines.push("  [     ] Project: ./sma.toml or ./.sma.toml".to_string()),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("  [{mark}] Global:  {}", path.display()));
        }

        lines.push("  [     ] Default: built-in defaults".to_string());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.provider.model, "gemma-3-27b-it");
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path().unwrap();
        assert!(path.to_string_lossy().contains("sma-assistant"));
    }

    #[test]
    fn test_project_file_overrides_global() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        fs::write(&global, "[server]\nport = 7000\nhost = \"127.0.0.1\"\n").unwrap();
        fs::write(dir.path().join("sma.toml"), "[server]\nport = 7100\n").unwrap();

        let config: FileConfig = ConfigLoader::figment(Some(global), dir.path(), None)
            .extract()
            .unwrap();
        assert_eq!(config.server.port, 7100);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_explicit_file_overrides_project() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".sma.toml"), "[provider]\nmodel = \"a\"\n").unwrap();
        let explicit = dir.path().join("custom.toml");
        fs::write(&explicit, "[provider]\nmodel = \"b\"\n").unwrap();

        let config: FileConfig = ConfigLoader::figment(None, dir.path(), Some(&explicit))
            .extract()
            .unwrap();
        assert_eq!(config.provider.model, "b");
        assert_eq!(config.provider.temperature, 0.1);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("bad.toml");
        fs::write(&explicit, "[server]\nport = \"not a number\"\n").unwrap();

        let result =
            ConfigLoader::figment(None, dir.path(), Some(&explicit)).extract::<FileConfig>();
        assert!(result.is_err());
    }
}
