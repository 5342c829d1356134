use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

const API_KEY_ENV: &str = "ATELIER_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.designworks.dev/v1".to_string()
}

fn default_model() -> String {
    "designworks-interior-2".to_string()
}

fn default_request_timeout_secs() -> u64 {
    90
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl StudioConfig {
    /// Environment wins over the config file; a missing or unreadable file
    /// just means defaults.
    pub fn load() -> Self {
        let mut config = Self::config_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .and_then(|raw| match serde_json::from_str::<Self>(&raw) {
                Ok(config) => Some(config),
                Err(err) => {
                    warn!("config file unreadable, using defaults: {err}");
                    None
                }
            })
            .unwrap_or_default();

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.api_key = key.trim().to_string();
            }
        }
        config
    }

    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "Atelier").map(|dirs| dirs.config_dir().join("config.json"))
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: StudioConfig = serde_json::from_str(r#"{"api_key":"sk-test"}"#).unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.base_url, default_base_url());
        assert_eq!(config.model, default_model());
        assert_eq!(config.request_timeout_secs, 90);
    }
}
