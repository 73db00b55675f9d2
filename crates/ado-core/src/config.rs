//! Configuration types.
//!
//! The configuration blob is a TOML document fetched once at startup. Every
//! field has a default so an empty blob is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Name of the configuration blob inside the config directory.
pub const CONFIG_FILE_NAME: &str = "ado.toml";

/// Runtime configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Query Engine settings
    #[serde(default)]
    pub engine: EngineConfig,

    /// Page transition settings
    #[serde(default)]
    pub transition: TransitionOptions,

    /// Redirect URL templates
    #[serde(default)]
    pub urls: UrlConfig,
}

impl AppConfig {
    /// Parse a TOML configuration blob.
    pub fn from_toml_str(blob: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(blob)?)
    }
}

/// Query Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Lua script implementing the engine, relative to the config directory.
    pub script: PathBuf,

    /// Per-call timeout in milliseconds.
    pub timeout_ms: u64,
}

impl EngineConfig {
    /// Per-call timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            script: PathBuf::from("engine.lua"),
            timeout_ms: 5000,
        }
    }
}

/// Named options controlling the navigation transition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TransitionOptions {
    /// Randomized multi-stage timing with a text-reveal pause.
    pub enable_delay: bool,

    /// Duration of the fast mode, in milliseconds.
    pub min_animation_time: u64,

    /// Ceiling of the slow randomized mode, in milliseconds.
    pub max_animation_time: u64,
}

impl TransitionOptions {
    /// Fast-mode duration.
    pub fn min_animation(&self) -> Duration {
        Duration::from_millis(self.min_animation_time)
    }

    /// Slow-mode ceiling.
    pub fn max_animation(&self) -> Duration {
        Duration::from_millis(self.max_animation_time)
    }
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self {
            enable_delay: false,
            min_animation_time: 300,
            max_animation_time: 1500,
        }
    }
}

/// Redirect URL templates. `{}` is replaced with the encoded payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UrlConfig {
    pub shopping: String,
    pub web_search: String,
    pub quote: String,
    /// Receives the raw community path (e.g. `/r/rust`).
    pub community: String,
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            shopping: "https://www.amazon.com/s?k={}".to_string(),
            web_search: "https://www.google.com/search?q={}".to_string(),
            quote: "https://finance.yahoo.com/quote/{}".to_string(),
            community: "https://old.reddit.com{}".to_string(),
        }
    }
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    if let Some(home) = dirs::home_dir() {
        let xdg = home.join(".config").join("ado");
        if xdg.exists() {
            return Some(xdg);
        }
    }
    dirs::config_dir().map(|p| p.join("ado"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_blob_is_default() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.transition.min_animation(), Duration::from_millis(300));
        assert!(!config.transition.enable_delay);
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::from_toml_str(
            r#"
            [engine]
            script = "mine.lua"

            [transition]
            enable_delay = true
            max_animation_time = 900

            [urls]
            quote = "https://quotes.example/{}"
            "#,
        )
        .unwrap();

        assert_eq!(config.engine.script, PathBuf::from("mine.lua"));
        assert_eq!(config.engine.timeout(), Duration::from_secs(5));
        assert!(config.transition.enable_delay);
        assert_eq!(config.transition.min_animation_time, 300);
        assert_eq!(config.transition.max_animation_time, 900);
        assert_eq!(config.urls.quote, "https://quotes.example/{}");
        assert_eq!(config.urls.shopping, UrlConfig::default().shopping);
    }

    #[test]
    fn test_invalid_blob() {
        let err = AppConfig::from_toml_str("[transition]\nenable_delay = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
