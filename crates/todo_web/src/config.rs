//! Environment-driven configuration.
//!
//! # Environment Variables
//!
//! - `TODO_DB_PATH`: SQLite file (default: `todos.sqlite3`)
//! - `HOST`: bind host (default: `0.0.0.0`)
//! - `PORT`: bind port (default: `3000`)
//! - `OPENAI_API_KEY`: bearer credential for the completion service
//! - `OPENAI_BASE_URL`: completion service base (default: `https://api.openai.com`)
//! - `OPENAI_MODEL`: completion model (default: `gpt-4`)
//! - `TODO_LOG_LEVEL`: `trace|debug|info|warn|error` (default: build dependent)
//! - `TODO_LOG_DIR`: absolute directory for rolling log files (default: stderr only)
//! - `TODO_LIST_TIMEOUT_MS`: list-fetch deadline before the loading view (default: `2000`)

use crate::server::ServerConfig;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_DB_PATH: &str = "todos.sqlite3";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-4";
const DEFAULT_LIST_TIMEOUT_MS: u64 = 2000;

/// Configuration error raised while reading the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Variable is set but cannot be parsed.
    Invalid { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid { key, value } => write!(f, "invalid value `{value}` for {key}"),
        }
    }
}

impl Error for ConfigError {}

/// Settings for the external completion service.
#[derive(Clone, PartialEq, Eq)]
pub struct CompletionConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl Debug for CompletionConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

/// Full application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub server: ServerConfig,
    pub completion: CompletionConfig,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub list_timeout: Duration,
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = match get("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let list_timeout_ms = match get("TODO_LIST_TIMEOUT_MS") {
            Some(value) => match value.parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "TODO_LIST_TIMEOUT_MS",
                        value,
                    })
                }
            },
            None => DEFAULT_LIST_TIMEOUT_MS,
        };

        Ok(Self {
            db_path: PathBuf::from(get("TODO_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.into())),
            server: ServerConfig::new(get("HOST").unwrap_or_else(|| DEFAULT_HOST.into()), port),
            completion: CompletionConfig {
                api_key: get("OPENAI_API_KEY"),
                base_url: get("OPENAI_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_BASE_URL.into()),
                model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
            },
            log_level: get("TODO_LOG_LEVEL")
                .unwrap_or_else(|| todo_core::default_log_level().to_string()),
            log_dir: get("TODO_LOG_DIR"),
            list_timeout: Duration::from_millis(list_timeout_ms),
        })
    }
}
