//! Vitrine configuration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Vitrine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitrineConfig {
    /// Catalog API configuration
    pub api: ApiConfig,

    /// Live filter configuration
    pub filter: FilterConfig,

    /// Notification configuration
    pub notifications: NotificationConfig,
}

/// Catalog API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the catalog server
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Submit debounced queries to the search endpoint
    pub auto_submit: bool,

    /// Shortest non-empty query that is auto-submitted
    pub min_query_len: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 10,
            auto_submit: false,
            min_query_len: 2,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Live filter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Quiet period before a typed query is applied
    pub debounce_ms: u64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self { debounce_ms: 500 }
    }
}

impl FilterConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Notification configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Seconds a toast stays up before it is removed
    pub ttl_secs: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { ttl_secs: 5 }
    }
}

impl NotificationConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl VitrineConfig {
    /// Load configuration from file, falling back to defaults when it is absent
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            info!("Loaded configuration from {:?}", path);
            Ok(config)
        } else {
            debug!("No configuration at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Load from file, then apply `VITRINE_*` environment overrides
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("VITRINE_API_URL").filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
        if let Some(ms) = lookup("VITRINE_DEBOUNCE_MS") {
            self.filter.debounce_ms = parse_override("VITRINE_DEBOUNCE_MS", &ms)?;
        }
        if let Some(secs) = lookup("VITRINE_TOAST_TTL_SECS") {
            self.notifications.ttl_secs = parse_override("VITRINE_TOAST_TTL_SECS", &secs)?;
        }
        if let Some(flag) = lookup("VITRINE_AUTO_SUBMIT") {
            self.api.auto_submit = match flag.trim() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                other => {
                    return Err(Error::InvalidConfig(format!(
                        "VITRINE_AUTO_SUBMIT: expected a boolean, got {:?}",
                        other
                    )))
                }
            };
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn parse_override<T: std::str::FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| Error::InvalidConfig(format!("{}: {}", key, e)))
}

/// Default configuration path
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".vitrine")
        .join("config.toml")
}
