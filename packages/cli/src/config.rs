use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Pagecraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Page document, relative to the project directory
    #[serde(default = "default_document_path")]
    pub document_path: String,

    /// Quiet period before a burst of edits is written
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Pointer travel in pixels before a press becomes a drag
    #[serde(default = "default_activation_distance")]
    pub activation_distance: f32,
}

fn default_document_path() -> String {
    "page.json".to_string()
}

fn default_debounce_ms() -> u64 {
    250
}

fn default_activation_distance() -> f32 {
    10.0
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the page document
    pub fn get_document_path(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.document_path)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            document_path: default_document_path(),
            debounce_ms: default_debounce_ms(),
            activation_distance: default_activation_distance(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "documentPath": "site/home.json",
            "debounceMs": 500,
            "activationDistance": 4.5
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.document_path, "site/home.json");
        assert_eq!(config.debounce(), Duration::from_millis(500));
        assert_eq!(config.activation_distance, 4.5);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{ "debounceMs": 0 }"#).unwrap();
        assert_eq!(config.document_path, "page.json");
        assert_eq!(config.debounce_ms, 0);
        assert_eq!(config.activation_distance, 10.0);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.document_path, "page.json");
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.get_document_path("/proj"), PathBuf::from("/proj/page.json"));
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::load(&dir.path().display().to_string()).unwrap();
        assert_eq!(config, Config::default());
    }
}
