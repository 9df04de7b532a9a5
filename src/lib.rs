pub mod catalog;
pub mod config;
pub mod favorites;
pub mod ffi;
pub mod model;
pub mod places;
pub mod reconcile;

pub use catalog::{Catalog, CatalogError, CatalogErrorKind, HttpCatalog, QueryKind};
pub use config::CompassConfig;
pub use favorites::{FavoritesError, FavoritesStore, InMemoryFavoritesStore, JsonFavoritesStore};
pub use model::*;
pub use places::{rank_by_distance, NearbyPlaces, StoreLocator};
pub use reconcile::{DetailScreen, FavoritesScreen, ScreenState, SearchScreen};

uniffi::setup_scaffolding!();
