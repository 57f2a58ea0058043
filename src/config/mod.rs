//! # Configuration
//!
//! Loads the suite settings from a `key=value` properties file. The loaded
//! [`Config`] is an ordinary value: the runner builds it once and hands it to
//! the [`ApiClient`](crate::http::client::ApiClient), so tests can point the
//! client at any base URL without touching process-wide state.

mod properties;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use url::Url;

pub use properties::PropertiesError;
pub(crate) use properties::parse_properties;

/// Key holding the root URL of the service under test.
pub const BASE_URL_KEY: &str = "base.url";
/// Optional key holding an explicit request timeout in milliseconds.
pub const TIMEOUT_MS_KEY: &str = "http.timeout.ms";
/// Environment variable that replaces `base.url` when set.
pub const BASE_URL_ENV: &str = "APIPROBE_BASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] PropertiesError),
    #[error("configuration key `{0}` is not set")]
    MissingKey(String),
    #[error("`{key}` is not a valid http(s) URL: `{value}`")]
    InvalidUrl { key: String, value: String },
    #[error("`{key}` must be a whole number of milliseconds, got `{value}`")]
    InvalidNumber { key: String, value: String },
}

/// Read-only settings resolved at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    values: HashMap<String, String>,
}

impl Config {
    /// Load settings from a properties file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file is missing or unreadable and
    /// [`ConfigError::Parse`] when a line is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&raw)?;
        tracing::debug!(path = %path.display(), keys = config.values.len(), "configuration loaded");
        Ok(config)
    }

    /// Parse settings from properties text.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            values: parse_properties(raw)?,
        })
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Replace `key` with `value` when an override is present.
    pub fn with_override(mut self, key: &str, value: Option<String>) -> Self {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            self.values.insert(key.to_string(), value.trim().to_string());
        }
        self
    }

    pub fn get(&self, key: &str) -> Result<&str, ConfigError> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))
    }

    /// The validated `base.url` setting.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let value = self.get(BASE_URL_KEY)?;
        let invalid = || ConfigError::InvalidUrl {
            key: BASE_URL_KEY.to_string(),
            value: value.to_string(),
        };
        let url = Url::parse(value).map_err(|_| invalid())?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(invalid());
        }
        Ok(url)
    }

    /// The explicit request timeout, if one is configured.
    pub fn timeout(&self) -> Result<Option<Duration>, ConfigError> {
        let Some(value) = self.values.get(TIMEOUT_MS_KEY) else {
            return Ok(None);
        };
        value
            .parse::<u64>()
            .map(|ms| Some(Duration::from_millis(ms)))
            .map_err(|_| ConfigError::InvalidNumber {
                key: TIMEOUT_MS_KEY.to_string(),
                value: value.clone(),
            })
    }
}
