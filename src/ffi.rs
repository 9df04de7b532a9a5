//! UniFFI bindings for cross-platform support (iOS, Android).
//!
//! This module provides FFI-safe types and functions for use with UniFFI.
//! Library types are converted to flat records suitable for FFI.

use crate::catalog::{Catalog, CatalogError, HttpCatalog};
use crate::config::{CompassConfig, ConfigError};
use crate::favorites::{FavoritesError, FavoritesStore, InMemoryFavoritesStore, JsonFavoritesStore};
use crate::model::{project_ingredients, FavoriteEntry, IngredientSlot, RecipeRecord};
use crate::places::{rank_by_distance, Coordinate, NearbyStore, PlaceCandidate};
use crate::reconcile::FavoriteMembership;
use camino::Utf8Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum CompassError {
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Network error: {message}")]
    Transport { message: String },

    #[error("Unexpected response: {message}")]
    Decode { message: String },

    #[error("Recipe not found: {message}")]
    NotFound { message: String },

    #[error("Favorites storage error: {message}")]
    Storage { message: String },

    #[error("Config error: {message}")]
    Config { message: String },
}

impl From<CatalogError> for CompassError {
    fn from(e: CatalogError) -> Self {
        let message = e.to_string();
        match e {
            CatalogError::InvalidRequest(_) => CompassError::InvalidRequest { message },
            CatalogError::Transport(_) => CompassError::Transport { message },
            CatalogError::Decode(_) => CompassError::Decode { message },
            CatalogError::NotFound(id) => CompassError::NotFound { message: id },
        }
    }
}

impl From<FavoritesError> for CompassError {
    fn from(e: FavoritesError) -> Self {
        CompassError::Storage {
            message: e.to_string(),
        }
    }
}

impl From<ConfigError> for CompassError {
    fn from(e: ConfigError) -> Self {
        CompassError::Config {
            message: e.to_string(),
        }
    }
}

/// FFI-safe representation of a recipe with its favorite status.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiRecipe {
    pub id: String,
    pub name: String,
    pub thumbnail_url: Option<String>,
    /// Instructions exactly as the catalog returned them
    pub instructions: Option<String>,
    /// Instructions for display, or a placeholder when none were provided
    pub instructions_text: String,
    /// Ordered display lines, e.g. "1 oz Lime juice"
    pub ingredients: Vec<String>,
    pub is_favorite: bool,
}

impl FfiRecipe {
    fn new(record: &RecipeRecord, is_favorite: bool) -> Self {
        FfiRecipe {
            id: record.id().to_string(),
            name: record.name().to_string(),
            thumbnail_url: record.thumbnail_url().map(str::to_string),
            instructions: record.instructions().map(str::to_string),
            instructions_text: record.instructions_text().to_string(),
            ingredients: record.ingredients(),
            is_favorite,
        }
    }
}

/// A saved drink as stored on the device.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiFavorite {
    pub id: String,
    pub name: String,
    pub thumbnail_url: Option<String>,
    pub instructions: Option<String>,
}

impl From<FavoriteEntry> for FfiFavorite {
    fn from(e: FavoriteEntry) -> Self {
        FfiFavorite {
            id: e.id,
            name: e.name,
            thumbnail_url: e.thumbnail_url,
            instructions: e.instructions,
        }
    }
}

impl From<FfiRecipe> for FavoriteEntry {
    fn from(r: FfiRecipe) -> Self {
        FavoriteEntry {
            id: r.id,
            name: r.name,
            thumbnail_url: r.thumbnail_url,
            instructions: r.instructions,
        }
    }
}

/// One ingredient/measure pair, for [`ingredient_lines`].
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiIngredientSlot {
    pub ingredient: Option<String>,
    pub measure: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, uniffi::Record)]
pub struct FfiCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<FfiCoordinate> for Coordinate {
    fn from(c: FfiCoordinate) -> Self {
        Coordinate::new(c.latitude, c.longitude)
    }
}

impl From<Coordinate> for FfiCoordinate {
    fn from(c: Coordinate) -> Self {
        FfiCoordinate {
            latitude: c.latitude,
            longitude: c.longitude,
        }
    }
}

/// A raw result from the platform's place search.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPlaceCandidate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub coordinate: FfiCoordinate,
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiNearbyStore {
    pub name: String,
    pub address: String,
    pub coordinate: FfiCoordinate,
    pub distance_meters: f64,
}

impl From<NearbyStore> for FfiNearbyStore {
    fn from(s: NearbyStore) -> Self {
        FfiNearbyStore {
            name: s.name,
            address: s.address,
            coordinate: s.coordinate.into(),
            distance_meters: s.distance_meters,
        }
    }
}

/// Catalog and favorites for one app process.
///
/// Create one instance at startup and share it between screens; it owns the
/// single favorites store.
#[derive(uniffi::Object)]
pub struct CocktailCompass {
    catalog: HttpCatalog,
    favorites: Mutex<FavoriteMembership>,
    config: CompassConfig,
}

impl CocktailCompass {
    fn with_config(config: CompassConfig) -> Result<Arc<Self>, CompassError> {
        let catalog = HttpCatalog::from_config(&config)?;
        let store: Arc<dyn FavoritesStore> = match &config.favorites_path {
            Some(path) => Arc::new(JsonFavoritesStore::new(path.clone())),
            None => Arc::new(InMemoryFavoritesStore::new()),
        };
        Ok(Arc::new(CocktailCompass {
            catalog,
            favorites: Mutex::new(FavoriteMembership::load(store)),
            config,
        }))
    }

    fn favorites(&self) -> MutexGuard<'_, FavoriteMembership> {
        self.favorites.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn annotate(&self, records: &[RecipeRecord]) -> Vec<FfiRecipe> {
        let mut favorites = self.favorites();
        favorites.refresh();
        records
            .iter()
            .map(|r| FfiRecipe::new(r, favorites.contains(r.id())))
            .collect()
    }
}

#[uniffi::export(async_runtime = "tokio")]
impl CocktailCompass {
    /// Creates an instance from a YAML config file, or from defaults when
    /// no path is given.
    #[uniffi::constructor]
    pub fn new(config_path: Option<String>) -> Result<Arc<Self>, CompassError> {
        let config = match config_path {
            Some(path) => CompassConfig::from_path(Utf8Path::new(&path))?,
            None => CompassConfig::default(),
        };
        Self::with_config(config)
    }

    /// Creates an instance from YAML config content.
    #[uniffi::constructor]
    pub fn from_yaml(content: String) -> Result<Arc<Self>, CompassError> {
        Self::with_config(CompassConfig::from_yaml_str(&content)?)
    }

    /// Searches drinks by name. A blank query returns no results without a
    /// network call.
    pub async fn search_by_name(&self, query: String) -> Result<Vec<FfiRecipe>, CompassError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let records = self.catalog.search_by_name(&query).await?;
        Ok(self.annotate(&records))
    }

    /// Lists drinks containing an ingredient. A blank ingredient returns no
    /// results without a network call.
    pub async fn search_by_ingredient(
        &self,
        ingredient: String,
    ) -> Result<Vec<FfiRecipe>, CompassError> {
        if ingredient.trim().is_empty() {
            return Ok(Vec::new());
        }
        let records = self.catalog.search_by_ingredient(&ingredient).await?;
        Ok(self.annotate(&records))
    }

    /// Fetches the full recipe for `id`.
    pub async fn fetch_by_id(&self, id: String) -> Result<FfiRecipe, CompassError> {
        let record = self.catalog.fetch_by_id(&id).await?;
        let mut favorites = self.favorites();
        favorites.refresh();
        Ok(FfiRecipe::new(&record, favorites.contains(record.id())))
    }

    /// Returns every saved drink.
    pub fn list_favorites(&self) -> Vec<FfiFavorite> {
        let mut favorites = self.favorites();
        favorites.refresh();
        favorites
            .store()
            .list()
            .into_iter()
            .map(FfiFavorite::from)
            .collect()
    }

    pub fn is_favorite(&self, id: String) -> bool {
        self.favorites().contains(&id)
    }

    /// Flips the favorite status of a recipe and returns the new status.
    ///
    /// The saved entry takes the raw `instructions`, never the display text.
    pub fn toggle_favorite(&self, recipe: FfiRecipe) -> Result<bool, CompassError> {
        let record = RecipeRecord::from_favorite(&recipe.into());
        Ok(self.favorites().toggle(&record)?)
    }

    /// Removes a saved drink and returns the remaining favorites.
    pub fn remove_favorite(&self, id: String) -> Result<Vec<FfiFavorite>, CompassError> {
        self.favorites().store().remove(&id)?;
        Ok(self.list_favorites())
    }

    /// Category string the host should hand to its place search.
    pub fn places_query(&self) -> String {
        self.config.places_query.clone()
    }
}

// ============================================================================
// Exported FFI Functions
// ============================================================================

/// Projects raw ingredient/measure pairs into display lines.
#[uniffi::export]
pub fn ingredient_lines(slots: Vec<FfiIngredientSlot>) -> Vec<String> {
    let slots: Vec<IngredientSlot> = slots
        .into_iter()
        .map(|s| IngredientSlot {
            ingredient: s.ingredient,
            measure: s.measure,
        })
        .collect();
    project_ingredients(&slots)
}

/// Orders place search results by distance from the user, nearest first.
///
/// Results without a name are dropped and missing addresses are filled in.
#[uniffi::export]
pub fn rank_stores(user: FfiCoordinate, candidates: Vec<FfiPlaceCandidate>) -> Vec<FfiNearbyStore> {
    let candidates = candidates
        .into_iter()
        .map(|c| PlaceCandidate {
            name: c.name,
            address: c.address,
            coordinate: c.coordinate.into(),
        })
        .collect();
    rank_by_distance(user.into(), candidates)
        .into_iter()
        .map(FfiNearbyStore::from)
        .collect()
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::{formatdoc, indoc};
    use mockito::{Matcher, Server};
    use tempfile::TempDir;

    const MARGARITA_RESPONSE: &str = indoc! {r#"
        {"drinks": [{
            "idDrink": "11007",
            "strDrink": "Margarita",
            "strDrinkThumb": "https://example.test/margarita.jpg",
            "strInstructions": null,
            "strIngredient1": "Tequila",
            "strIngredient2": "Triple sec",
            "strIngredient3": "Lime juice",
            "strMeasure1": "1 1/2 oz ",
            "strMeasure2": "1/2 oz ",
            "strMeasure3": "1 oz "
        }]}"#};

    fn compass_for(server: &Server, temp_dir: &TempDir) -> Arc<CocktailCompass> {
        let favorites = temp_dir.path().join("favorites.json");
        CocktailCompass::from_yaml(formatdoc! {r#"
            base_url: {}
            favorites_path: {}
        "#, server.url(), favorites.display()})
        .unwrap()
    }

    #[tokio::test]
    async fn test_search_favorite_and_remove() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/search.php")
            .match_query(Matcher::UrlEncoded("s".into(), "margarita".into()))
            .with_body(MARGARITA_RESPONSE)
            .create_async()
            .await;
        let temp_dir = TempDir::new().unwrap();
        let compass = compass_for(&server, &temp_dir);

        let results = compass.search_by_name("margarita".to_string()).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].instructions, None);
        assert_eq!(results[0].instructions_text, "No instructions provided.");
        assert_eq!(
            results[0].ingredients,
            vec!["1 1/2 oz Tequila", "1/2 oz Triple sec", "1 oz Lime juice"]
        );
        assert!(!results[0].is_favorite);

        assert!(compass.toggle_favorite(results[0].clone()).unwrap());
        assert!(compass.is_favorite("11007".to_string()));

        let results = compass.search_by_name("margarita".to_string()).await.unwrap();
        assert!(results[0].is_favorite);

        let favorites = compass.list_favorites();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, "11007");
        assert_eq!(favorites[0].instructions, None);

        let remaining = compass.remove_favorite("11007".to_string()).unwrap();
        assert!(remaining.is_empty());
        assert!(!compass.is_favorite("11007".to_string()));
    }

    #[tokio::test]
    async fn test_blank_search_skips_network() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let temp_dir = TempDir::new().unwrap();
        let compass = compass_for(&server, &temp_dir);

        assert!(compass.search_by_name(String::new()).await.unwrap().is_empty());
        assert!(compass.search_by_ingredient(" ".to_string()).await.unwrap().is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_by_id_not_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/lookup.php")
            .match_query(Matcher::Any)
            .with_body(r#"{"drinks": null}"#)
            .create_async()
            .await;
        let temp_dir = TempDir::new().unwrap();
        let compass = compass_for(&server, &temp_dir);

        let result = compass.fetch_by_id("1".to_string()).await;
        assert!(matches!(result, Err(CompassError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_toggle_keeps_real_instructions() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/search.php")
            .match_query(Matcher::Any)
            .with_body(indoc! {r#"
                {"drinks": [{
                    "idDrink": "11000",
                    "strDrink": "Mojito",
                    "strInstructions": "Muddle mint leaves with sugar and lime juice."
                }]}"#})
            .create_async()
            .await;
        let temp_dir = TempDir::new().unwrap();
        let compass = compass_for(&server, &temp_dir);

        let results = compass.search_by_name("mojito".to_string()).await.unwrap();
        assert_eq!(results[0].instructions_text, "Muddle mint leaves with sugar and lime juice.");
        assert!(compass.toggle_favorite(results[0].clone()).unwrap());

        let favorites = compass.list_favorites();
        assert_eq!(
            favorites[0].instructions.as_deref(),
            Some("Muddle mint leaves with sugar and lime juice.")
        );
        assert_eq!(favorites[0].thumbnail_url, None);
    }

    #[tokio::test]
    async fn test_fetch_by_id_sees_favorites_saved_elsewhere() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/lookup.php")
            .match_query(Matcher::UrlEncoded("i".into(), "11007".into()))
            .with_body(MARGARITA_RESPONSE)
            .create_async()
            .await;
        let temp_dir = TempDir::new().unwrap();
        let compass = compass_for(&server, &temp_dir);
        assert!(!compass.fetch_by_id("11007".to_string()).await.unwrap().is_favorite);

        let path = Utf8Path::from_path(temp_dir.path()).unwrap().join("favorites.json");
        JsonFavoritesStore::new(path)
            .add(FavoriteEntry::new("11007", "Margarita"))
            .unwrap();

        let recipe = compass.fetch_by_id("11007".to_string()).await.unwrap();
        assert!(recipe.is_favorite);
        assert!(recipe.instructions.is_none());
    }

    #[test]
    fn test_default_instance_keeps_favorites_in_memory() {
        let compass = CocktailCompass::new(None).unwrap();
        assert!(compass.list_favorites().is_empty());
        assert_eq!(compass.places_query(), "Grocery Store, Liquor Store");
    }

    #[test]
    fn test_bad_config_is_config_error() {
        let result = CocktailCompass::from_yaml("base_url: not a url".to_string());
        assert!(matches!(result, Err(CompassError::Config { .. })));
    }

    #[test]
    fn test_ingredient_lines() {
        let lines = ingredient_lines(vec![
            FfiIngredientSlot {
                ingredient: Some("Vodka".to_string()),
                measure: Some(" 2 oz".to_string()),
            },
            FfiIngredientSlot {
                ingredient: None,
                measure: Some("1 oz".to_string()),
            },
            FfiIngredientSlot {
                ingredient: Some("Ice".to_string()),
                measure: None,
            },
        ]);
        assert_eq!(lines, vec!["2 oz Vodka", "Ice"]);
    }

    #[test]
    fn test_rank_stores() {
        let user = FfiCoordinate {
            latitude: 0.0,
            longitude: 0.0,
        };
        let at = |latitude: f64| FfiCoordinate {
            latitude,
            longitude: 0.0,
        };
        let stores = rank_stores(
            user,
            vec![
                FfiPlaceCandidate {
                    name: Some("Far".to_string()),
                    address: None,
                    coordinate: at(0.01),
                },
                FfiPlaceCandidate {
                    name: Some("Near".to_string()),
                    address: Some("1 Main St".to_string()),
                    coordinate: at(0.001),
                },
            ],
        );

        assert_eq!(stores[0].name, "Near");
        assert_eq!(stores[1].address, "No Address");
        assert!(stores[0].distance_meters < stores[1].distance_meters);
    }

    #[test]
    fn test_library_version() {
        let version = library_version();
        assert!(!version.is_empty());
        assert_eq!(version, env!("CARGO_PKG_VERSION"));
    }
}
