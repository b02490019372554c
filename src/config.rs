//! Application configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable that overrides the suggestion service URL.
pub const API_URL_ENV: &str = "GOMOKU_API_URL";

/// Top-level configuration loaded from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default display name for player A.
    #[serde(default = "default_player_a")]
    player_a: String,

    /// Default display name for player B.
    #[serde(default = "default_player_b")]
    player_b: String,

    /// Move-suggestion service settings.
    #[serde(default)]
    suggestion: SuggestionConfig,
}

/// Where and how to reach the move-suggestion service.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Service base URL, without the route.
    #[serde(default = "default_base_url")]
    base_url: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,
}

#[instrument]
fn default_player_a() -> String {
    "Human".to_string()
}

#[instrument]
fn default_player_b() -> String {
    "Gomoku AI".to_string()
}

#[instrument]
fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

#[instrument]
fn default_timeout_ms() -> u64 {
    5000
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl SuggestionConfig {
    /// Request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            player_a: default_player_a(),
            player_b: default_player_b(),
            suggestion: SuggestionConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(base_url = %config.suggestion.base_url, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, falling back to defaults otherwise.
    ///
    /// A file that exists but does not parse is still an error.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies environment overrides.
    #[instrument(skip(self))]
    pub fn with_env_overrides(self) -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(url) => self.with_base_url(url),
            Err(_) => self,
        }
    }

    /// Replaces the suggestion service URL.
    #[instrument(skip(self))]
    pub fn with_base_url(mut self, url: String) -> Self {
        if url.trim().is_empty() {
            return self;
        }
        info!(base_url = %url, "Overriding suggestion service URL");
        self.suggestion.base_url = url;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
