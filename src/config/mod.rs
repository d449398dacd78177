//
//  chatbridge
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Client configuration for the ChatBridge SDK and CLI.
//!
//! ## Recognized Options
//!
//! | Key | Default | Meaning |
//! |-----|---------|---------|
//! | `base_url` | `https://chatbridge.cloud/api/v1` | API root |
//! | `timeout` | `30` | Total request timeout, seconds |
//! | `connect_timeout` | `10` | Connection timeout, seconds |
//! | `debug` | `false` | Verbose wire-level logging |
//! | `max_retries` | `2` | Retry hint for callers, not used internally |
//! | `retry_delay` | `1000` | Retry pause hint for callers, milliseconds |
//!
//! Caller-supplied keys override the defaults. Unrecognized keys are kept in
//! [`ClientConfig::extra`] and otherwise ignored.
//!
//! ## Configuration File Location
//!
//! The CLI reads an optional TOML file from the platform config directory:
//!
//! - **Linux**: `~/.config/chatbridge/config.toml`
//! - **macOS**: `~/Library/Application Support/chatbridge/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\chatbridge\config.toml`
//!
//! Set `CHATBRIDGE_CONFIG` to use a different file.
//!
//! ```toml
//! base_url = "https://chatbridge.cloud/api/v1"
//! timeout = 60
//! debug = false
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use chatbridge::config::ClientConfig;
//! use serde_json::json;
//!
//! let config = ClientConfig::from_overrides(json!({"timeout": 5, "region": "id"}))?;
//! assert_eq!(config.timeout, 5);
//! assert_eq!(config.connect_timeout, 10);
//! assert_eq!(config.get("region"), Some(json!("id")));
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://chatbridge.cloud/api/v1";

/// Environment variable that overrides the configuration file location.
pub const CONFIG_PATH_ENV: &str = "CHATBRIDGE_CONFIG";

/// Keys understood by [`ClientConfig`]; anything else lands in `extra`.
pub const RECOGNIZED_KEYS: [&str; 6] = [
    "base_url",
    "timeout",
    "connect_timeout",
    "debug",
    "max_retries",
    "retry_delay",
];

/// Configuration captured by a client at construction time.
///
/// Every recognized field has a serde default, so deserializing a partial
/// document merges it over the defaults.
///
/// # Examples
///
/// ```rust
/// use chatbridge::config::ClientConfig;
///
/// let config = ClientConfig::default();
/// assert_eq!(config.base_url, "https://chatbridge.cloud/api/v1");
/// assert_eq!(config.timeout, 30);
/// assert!(!config.debug);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API root that endpoint paths are joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Total request timeout, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Connection timeout, in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,

    /// Emit verbose wire-level logging.
    #[serde(default)]
    pub debug: bool,

    /// Retry budget hint for callers. The client never retries on its own.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Pause between caller retries, in milliseconds.
    #[serde(default = "default_retry_delay")]
    pub retry_delay: u64,

    /// Unrecognized keys, retained as given.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_delay() -> u64 {
    1000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
            debug: false,
            max_retries: default_max_retries(),
            retry_delay: default_retry_delay(),
            extra: BTreeMap::new(),
        }
    }
}

impl ClientConfig {
    /// Merges a JSON object of overrides over the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `overrides` is not an object or a recognized key
    /// has the wrong type.
    pub fn from_overrides(overrides: Value) -> Result<Self> {
        if !overrides.is_object() {
            bail!("Configuration overrides must be a JSON object");
        }
        serde_json::from_value(overrides).context("Invalid client configuration")
    }

    /// Parses a TOML document, merging it over the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid configuration file")
    }

    /// Loads the configuration file from its default location.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads a configuration file, or the defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Saves the configuration to its default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration as TOML, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the configuration file path.
    ///
    /// `CHATBRIDGE_CONFIG` takes precedence over the platform config directory.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        let dirs = ProjectDirs::from("", "", "chatbridge")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Looks up any key, recognized or not, as a JSON value.
    pub fn get(&self, key: &str) -> Option<Value> {
        match key {
            "base_url" => Some(Value::from(self.base_url.clone())),
            "timeout" => Some(Value::from(self.timeout)),
            "connect_timeout" => Some(Value::from(self.connect_timeout)),
            "debug" => Some(Value::from(self.debug)),
            "max_retries" => Some(Value::from(self.max_retries)),
            "retry_delay" => Some(Value::from(self.retry_delay)),
            _ => self.extra.get(key).cloned(),
        }
    }

    /// Sets a key from its string form.
    ///
    /// Recognized keys are parsed to their type; other keys are stored in
    /// `extra` as strings.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "base_url" => self.base_url = value.to_string(),
            "timeout" => self.timeout = parse_number(key, value)?,
            "connect_timeout" => self.connect_timeout = parse_number(key, value)?,
            "debug" => {
                self.debug = value
                    .parse()
                    .with_context(|| format!("'{}' expects true or false", key))?
            }
            "max_retries" => self.max_retries = parse_number(key, value)?,
            "retry_delay" => self.retry_delay = parse_number(key, value)?,
            _ => {
                self.extra
                    .insert(key.to_string(), Value::from(value.to_string()));
            }
        }
        Ok(())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn with_connect_timeout(mut self, seconds: u64) -> Self {
        self.connect_timeout = seconds;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn connect_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    pub fn retry_delay_duration(&self) -> Duration {
        Duration::from_millis(self.retry_delay)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("'{}' expects a non-negative integer", key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, 30);
        assert_eq!(config.connect_timeout, 10);
        assert!(!config.debug);
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.retry_delay, 1000);
        assert!(config.extra.is_empty());
    }

    #[test]
    fn test_overrides_merge_and_keep_unknown_keys() {
        let config = ClientConfig::from_overrides(json!({
            "base_url": "http://localhost:8080/api",
            "debug": true,
            "tenant": "acme"
        }))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert!(config.debug);
        assert_eq!(config.timeout, 30);
        assert_eq!(config.get("tenant"), Some(json!("acme")));
        assert_eq!(config.get("timeout"), Some(json!(30)));
        assert_eq!(config.get("missing"), None);
    }

    #[test]
    fn test_overrides_reject_wrong_types() {
        assert!(ClientConfig::from_overrides(json!({"timeout": "soon"})).is_err());
        assert!(ClientConfig::from_overrides(json!(["timeout"])).is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        assert_eq!(ClientConfig::load_from(&path).unwrap(), ClientConfig::default());

        let mut config = ClientConfig::default().with_timeout(45);
        config.set("region", "id").unwrap();
        config.save_to(&path).unwrap();

        let loaded = ClientConfig::load_from(&path).unwrap();
        assert_eq!(loaded.timeout, 45);
        assert_eq!(loaded.get("region"), Some(json!("id")));
    }

    #[test]
    fn test_set_parses_recognized_keys() {
        let mut config = ClientConfig::default();
        config.set("connect_timeout", "3").unwrap();
        config.set("debug", "true").unwrap();
        assert_eq!(config.connect_timeout_duration(), Duration::from_secs(3));
        assert!(config.debug);
        assert!(config.set("timeout", "-1").is_err());
        assert!(config.set("debug", "yes").is_err());
    }
}
