//! Layered configuration for the PulseAI client.
//!
//! Values are merged from TOML files (working directory, then the platform
//! config dir, then `~/.pulse`), `.env` files, and `PULSE_*` environment
//! variables, in that order of increasing precedence. The TUI applies CLI
//! overrides on top of whatever this module loads.

use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PulseConfig {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the PulseAI backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Name of the bundled theme to start with
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Event-loop tick rate
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,

    /// Quiet period after the last search keystroke before the search runs
    #[serde(default = "default_search_debounce")]
    pub search_debounce_ms: u64,

    /// How long a message found via search stays highlighted
    #[serde(default = "default_highlight")]
    pub highlight_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_theme() -> String {
    "pulse-dark".to_string()
}

fn default_tick_rate() -> u64 {
    250
}

fn default_search_debounce() -> u64 {
    300
}

fn default_highlight() -> u64 {
    2000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            tick_rate_ms: default_tick_rate(),
            search_debounce_ms: default_search_debounce(),
            highlight_ms: default_highlight(),
        }
    }
}

impl PulseConfig {
    pub fn load() -> Result<Self, ConfigLoadError> {
        Self::load_from_paths(get_config_paths())
    }

    pub fn load_from_paths(paths: Vec<PathBuf>) -> Result<Self, ConfigLoadError> {
        load_dotenv_files();

        let mut builder = ConfigBuilder::builder();

        for path in paths {
            if path.exists() {
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("PULSE")
                .separator("_")
                .try_parsing(true),
        );

        let config = builder.build()?;

        let mut pulse_config: PulseConfig = config.try_deserialize().unwrap_or_default();

        if let Ok(url) = std::env::var("PULSE_API_URL") {
            pulse_config.api.base_url = url;
        }

        if let Ok(level) = std::env::var("PULSE_LOG_LEVEL") {
            pulse_config.logging.level = level;
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            pulse_config.logging.level = level;
        }

        pulse_config.validate()?;

        Ok(pulse_config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.api.base_url.is_empty() {
            return Err(ConfigLoadError::MissingRequired("api.base_url".to_string()));
        }

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(ConfigLoadError::InvalidValue {
                key: "api.base_url".to_string(),
                message: "Must be an http:// or https:// URL".to_string(),
            });
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigLoadError::InvalidValue {
                key: "api.timeout_secs".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        let level_lower = self.logging.level.to_lowercase();
        if !valid_levels.contains(&level_lower.as_str()) && !level_lower.contains('=') {
            return Err(ConfigLoadError::InvalidValue {
                key: "logging.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Must be one of: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        Ok(())
    }

    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }

    pub fn log_level(&self) -> &str {
        &self.logging.level
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.api.timeout_secs)
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join("pulse.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("pulse").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".pulse").join("config.toml"));
    }

    paths
}

fn load_dotenv_files() {
    let mut env_paths = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        env_paths.push(cwd.join(".env"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        env_paths.push(config_dir.join("pulse").join(".env"));
    }

    for path in env_paths {
        if path.exists() {
            let _ = dotenvy::from_path(&path);
        }
    }
}

pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pulse"))
}

pub fn get_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("pulse"))
}

pub fn ensure_config_dir() -> Result<PathBuf, std::io::Error> {
    let config_dir = get_config_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine config directory",
        )
    })?;

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

/// Location of the persisted bearer token, the terminal analogue of the
/// browser's local storage slot.
pub fn default_token_path() -> Option<PathBuf> {
    get_config_dir().map(|d| d.join("token"))
}
