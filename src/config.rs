use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::languages;
use crate::services::translation::{DEFAULT_ENDPOINT, DEFAULT_USER_AGENT};
use crate::services::{Endpoint, RequestMethod};

/// Overrides `user_agent` from the config file when set and non-empty.
pub const USER_AGENT_ENV: &str = "IDIOM_USER_AGENT";

const DEFAULT_PULSE_MS: u64 = 100;
const MIN_PULSE_MS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub user_agent: String,
    pub request_method: RequestMethod,
    /// Whole-request timeout. Unset keeps the HTTP client's default.
    pub timeout_secs: Option<u64>,
    pub top_lang: String,
    pub bottom_lang: String,
    pub pulse_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_method: RequestMethod::Post,
            timeout_secs: None,
            top_lang: languages::AUTO.to_string(),
            bottom_lang: "en".to_string(),
            pulse_interval_ms: DEFAULT_PULSE_MS,
        }
    }
}

impl Config {
    /// `$XDG_CONFIG_HOME/idiom/config.json` or the platform equivalent.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("idiom").join("config.json"))
    }

    /// Loads the user's config, falling back to defaults on any problem.
    pub fn load() -> Self {
        let config = match Self::path() {
            Some(path) => Self::load_from(&path).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "using default config");
                Self::default()
            }),
            None => Self::default(),
        };

        config.with_user_agent_override(std::env::var(USER_AGENT_ENV).ok())
    }

    /// A missing file is not an error; it yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        let contents = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, contents).map_err(io_err)
    }

    /// Records the selector languages in the file at `path`, leaving every
    /// other setting as the file has it.
    pub fn save_languages_to(path: &Path, top: &str, bottom: &str) -> Result<(), ConfigError> {
        let mut config = Self::load_from(path)?;
        config.top_lang = top.to_string();
        config.bottom_lang = bottom.to_string();
        config.save_to(path)
    }

    pub fn with_user_agent_override(mut self, user_agent: Option<String>) -> Self {
        if let Some(ua) = user_agent.filter(|ua| !ua.trim().is_empty()) {
            self.user_agent = ua;
        }
        self
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint {
            base_url: self.endpoint.clone(),
            user_agent: self.user_agent.clone(),
            method: self.request_method,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn pulse_interval(&self) -> Duration {
        Duration::from_millis(self.pulse_interval_ms.max(MIN_PULSE_MS))
    }
}
