//! Remote recipe catalog.
//!
//! This module queries the public cocktail service over HTTP and decodes its
//! responses into [`RecipeRecord`]s. Every call is a fresh round trip: there
//! is no response cache, no request deduplication and no retry.

use crate::config::{CompassConfig, ConfigError};
use crate::model::RecipeRecord;
use async_trait::async_trait;
use log::debug;
use reqwest::Url;
use std::time::Duration;
use thiserror::Error;

mod model;

use model::DrinkResponse;
pub use model::{CatalogErrorKind, QueryKind};

/// Errors that can occur when querying the catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid request url: {0}")]
    InvalidRequest(String),

    #[error("Catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Recipe not found: {0}")]
    NotFound(String),
}

impl CatalogError {
    pub fn kind(&self) -> CatalogErrorKind {
        match self {
            CatalogError::InvalidRequest(_) => CatalogErrorKind::InvalidRequest,
            CatalogError::Transport(_) => CatalogErrorKind::TransportFailure,
            CatalogError::Decode(_) => CatalogErrorKind::DecodeFailure,
            CatalogError::NotFound(_) => CatalogErrorKind::NotFound,
        }
    }
}

impl From<ConfigError> for CatalogError {
    fn from(e: ConfigError) -> Self {
        CatalogError::InvalidRequest(e.to_string())
    }
}

/// Read access to a recipe catalog.
///
/// List queries return an empty vector when nothing matches. The by-id lookup
/// requires exactly one result and reports zero as [`CatalogError::NotFound`].
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn search_by_name(&self, query: &str) -> Result<Vec<RecipeRecord>, CatalogError>;

    async fn search_by_ingredient(&self, ingredient: &str)
        -> Result<Vec<RecipeRecord>, CatalogError>;

    async fn fetch_by_id(&self, id: &str) -> Result<RecipeRecord, CatalogError>;

    /// Runs the list query selected by `kind`.
    async fn query(&self, kind: QueryKind, text: &str) -> Result<Vec<RecipeRecord>, CatalogError> {
        match kind {
            QueryKind::ByName => self.search_by_name(text).await,
            QueryKind::ByIngredient => self.search_by_ingredient(text).await,
        }
    }
}

/// [`Catalog`] backed by the cocktail service's JSON API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpCatalog {
    /// Creates a client rooted at `base_url`.
    ///
    /// The base url must end with `/`; see [`CompassConfig::base_url`].
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(HttpCatalog { client, base_url })
    }

    pub fn from_config(config: &CompassConfig) -> Result<Self, CatalogError> {
        Self::new(config.base_url()?, config.request_timeout())
    }

    /// Builds `<base>/<endpoint>?<key>=<value>` with the value form-encoded.
    fn endpoint_url(&self, endpoint: &str, key: &str, value: &str) -> Result<Url, CatalogError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| CatalogError::InvalidRequest(format!("{endpoint}: {e}")))?;
        url.query_pairs_mut().append_pair(key, value);
        Ok(url)
    }

    async fn fetch_drinks(&self, url: Url) -> Result<Vec<RecipeRecord>, CatalogError> {
        debug!("GET {url}");
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        let envelope: DrinkResponse = serde_json::from_slice(&body)?;
        let drinks = envelope.drinks.unwrap_or_default();
        debug!("catalog returned {} drinks", drinks.len());
        Ok(drinks)
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn search_by_name(&self, query: &str) -> Result<Vec<RecipeRecord>, CatalogError> {
        let (endpoint, key) = QueryKind::ByName.endpoint();
        let url = self.endpoint_url(endpoint, key, query)?;
        self.fetch_drinks(url).await
    }

    async fn search_by_ingredient(
        &self,
        ingredient: &str,
    ) -> Result<Vec<RecipeRecord>, CatalogError> {
        let (endpoint, key) = QueryKind::ByIngredient.endpoint();
        let url = self.endpoint_url(endpoint, key, ingredient)?;
        self.fetch_drinks(url).await
    }

    async fn fetch_by_id(&self, id: &str) -> Result<RecipeRecord, CatalogError> {
        let url = self.endpoint_url("lookup.php", "i", id)?;
        self.fetch_drinks(url)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }
}
