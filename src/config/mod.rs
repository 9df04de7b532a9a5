//! Library configuration.
//!
//! Hosts ship a small YAML file alongside the app bundle. Every key is
//! optional; missing keys take the defaults below.
//!
//! ```yaml
//! base_url: https://www.thecocktaildb.com/api/json/v1/1/
//! request_timeout_secs: 15
//! favorites_path: /data/user/0/app/files/favorites.json
//! places_query: Grocery Store, Liquor Store
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://www.thecocktaildb.com/api/json/v1/1/";
pub const DEFAULT_PLACES_QUERY: &str = "Grocery Store, Liquor Store";

/// One statute mile, the span the map shows around the user.
pub const DEFAULT_MAP_SPAN_METERS: f64 = 1609.34;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    IoError {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompassConfig {
    /// Root of the recipe service; endpoint names are appended to it.
    pub base_url: String,
    pub request_timeout_secs: u64,
    /// Where favorites are persisted. `None` keeps them in memory only.
    pub favorites_path: Option<Utf8PathBuf>,
    /// Free-text category handed to the nearby-places provider.
    pub places_query: String,
    /// Latitude/longitude span of the nearby-places search region.
    pub search_span_degrees: f64,
    pub map_span_meters: f64,
}

impl Default for CompassConfig {
    fn default() -> Self {
        CompassConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 15,
            favorites_path: None,
            places_query: DEFAULT_PLACES_QUERY.to_string(),
            search_span_degrees: 0.1,
            map_span_meters: DEFAULT_MAP_SPAN_METERS,
        }
    }
}

impl CompassConfig {
    /// Loads and validates a YAML config file.
    pub fn from_path(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parses and validates YAML config content.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: CompassConfig = if content.trim().is_empty() {
            CompassConfig::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.base_url()?;
        Ok(config)
    }

    /// Returns the parsed base url, normalized to end with `/` so endpoint
    /// names join beneath it instead of replacing its last segment.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let raw = if self.base_url.ends_with('/') {
            self.base_url.clone()
        } else {
            format!("{}/", self.base_url)
        };
        let url = Url::parse(&raw).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: "url cannot be used as a base".to_string(),
            });
        }
        Ok(url)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
