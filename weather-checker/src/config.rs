//! Configuration file and CLI overrides
//!
//! Precedence: CLI flag, then environment (handled by clap), then the TOML
//! file, then built-in defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

use crate::permission::LocationConfig;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_LANG: &str = "ja";
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

const APP_NAME: &str = "weather-checker";
const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "weather-checker.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error(
        "no API key configured (use --api-key, OPENWEATHER_API_KEY or api.api_key in the config file)"
    )]
    MissingApiKey,

    #[error("invalid base URL {0:?}")]
    InvalidBaseUrl(String),
}

/// `[api]` section
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub lang: String,
    pub connect_timeout_ms: u64,
    pub read_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            lang: DEFAULT_LANG.to_string(),
            connect_timeout_ms: DEFAULT_TIMEOUT_MS,
            read_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ApiConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

/// `[log]` section
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub file: Option<PathBuf>,
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}

impl LogConfig {
    /// Configured file, or `weather-checker.log` in the platform data dir.
    pub fn resolved_file(&self) -> PathBuf {
        if let Some(file) = &self.file {
            return file.clone();
        }
        match project_dirs() {
            Some(dirs) => dirs.data_local_dir().join(LOG_FILE),
            None => PathBuf::from(LOG_FILE),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub api: ApiConfig,
    /// Replaces the bundled city list when non-empty
    pub cities: Vec<String>,
    pub location: LocationConfig,
    pub log: LogConfig,
}

/// Values supplied on the command line
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub lang: Option<String>,
    pub base_url: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match default_config_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_toml_str(&content, &path),
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }

    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(key) = overrides.api_key {
            self.api.api_key = Some(key);
        }
        if let Some(lang) = overrides.lang {
            self.api.lang = lang;
        }
        if let Some(base_url) = overrides.base_url {
            self.api.base_url = base_url;
        }
        if let Some(file) = overrides.log_file {
            self.log.file = Some(file);
        }
    }

    /// Check everything the fetch flow depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.api.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => {}
            _ => return Err(ConfigError::MissingApiKey),
        }

        let base = self.api.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) || base.contains('?') {
            return Err(ConfigError::InvalidBaseUrl(self.api.base_url.clone()));
        }

        Ok(())
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
}

pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}
