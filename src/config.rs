use std::path::Path;

use serde::Deserialize;

use crate::types::payload::NotificationDefaults;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the backend that owns the subscription records.
    pub backend_base: String,
    /// Origin every click target is resolved against.
    pub origin: String,
    pub app_name: String,
    /// Fixed scope path the background worker is registered at.
    pub worker_path: String,
    pub cache_prefix: String,
    pub cache_version: u32,
    /// Shell resources cached on install.
    pub shell_urls: Vec<String>,
    pub default_icon: String,
    pub default_badge: String,
    pub csrf_token: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_base: "http://127.0.0.1:8000".to_string(),
            origin: "http://127.0.0.1:8000".to_string(),
            app_name: "Courier".to_string(),
            worker_path: "/service-worker.js".to_string(),
            cache_prefix: "courier-shell".to_string(),
            cache_version: 1,
            shell_urls: vec!["/".to_string(), "/offline".to_string()],
            default_icon: "/static/icons/icon-192.png".to_string(),
            default_badge: "/static/icons/badge-72.png".to_string(),
            csrf_token: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "config file not readable: {err}"),
            ConfigError::Parse(err) => write!(f, "config file not valid toml: {err}"),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        toml::from_str(&contents).map_err(ConfigError::Parse)
    }

    pub fn defaults(&self) -> NotificationDefaults {
        NotificationDefaults::for_app(&self.app_name, &self.default_icon, &self.default_badge)
    }
}
