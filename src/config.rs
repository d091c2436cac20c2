use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::utils::paths::get_config_path;

pub const DEFAULT_UI_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Mask password fields when printing or rendering a peer
    #[serde(default = "default_mask_secrets")]
    pub mask_secrets: bool,

    /// Base URL of the web UI, used to open mirror edit pages
    #[serde(default = "default_ui_url")]
    pub ui_url: String,
}

fn default_theme() -> String {
    "default".to_string()
}

fn default_mask_secrets() -> bool {
    true
}

fn default_ui_url() -> String {
    DEFAULT_UI_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            mask_secrets: default_mask_secrets(),
            ui_url: default_ui_url(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&get_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid TOML in {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, "default");
        assert!(config.mask_secrets);
        assert_eq!(config.ui_url, DEFAULT_UI_URL);
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
        theme = "dark"
        mask_secrets = false
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "dark");
        assert!(!config.mask_secrets);
        assert_eq!(config.ui_url, DEFAULT_UI_URL);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.theme, "default");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            ui_url: "https://peers.example.com".to_string(),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.ui_url, "https://peers.example.com");
        assert!(loaded.mask_secrets);
    }

    #[test]
    fn test_to_toml_lists_every_key() {
        let text = Config::default().to_toml().unwrap();
        assert!(text.contains("theme = \"default\""));
        assert!(text.contains("mask_secrets = true"));
        assert!(text.contains("ui_url = \"http://localhost:3000\""));
    }

    #[test]
    fn test_invalid_toml_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "theme = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }
}
