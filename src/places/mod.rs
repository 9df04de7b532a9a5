//! Nearby stores.
//!
//! Place search itself belongs to the host platform (a map kit, a places
//! API). This module asks a [`NearbyPlaces`] provider for candidates around
//! the user, drops unusable ones, and orders the rest by straight-line
//! distance from the user.

use crate::config::CompassConfig;
use log::debug;
use thiserror::Error;

mod model;

pub use model::{Coordinate, MapRegion, NearbyStore, PlaceCandidate};

/// Address shown for a place the provider returned without one.
pub const NO_ADDRESS: &str = "No Address";

#[derive(Error, Debug)]
pub enum PlacesError {
    #[error("Place search failed: {0}")]
    SearchFailed(String),

    #[error("User location is not available")]
    LocationUnavailable,
}

/// Host-provided place search.
///
/// Called synchronously once a user coordinate is known.
pub trait NearbyPlaces: Send + Sync {
    fn search(&self, region: &MapRegion, query: &str) -> Result<Vec<PlaceCandidate>, PlacesError>;
}

/// Finds stores around the user and sorts them nearest first.
pub struct StoreLocator<P> {
    provider: P,
    query: String,
    search_span_degrees: f64,
    map_span_meters: f64,
}

impl<P: NearbyPlaces> StoreLocator<P> {
    pub fn new(provider: P, config: &CompassConfig) -> Self {
        StoreLocator {
            provider,
            query: config.places_query.clone(),
            search_span_degrees: config.search_span_degrees,
            map_span_meters: config.map_span_meters,
        }
    }

    /// Region to display around the user.
    ///
    /// Fails with [`PlacesError::LocationUnavailable`] before the first fix.
    pub fn recenter(&self, user: Option<Coordinate>) -> Result<MapRegion, PlacesError> {
        let user = user.ok_or(PlacesError::LocationUnavailable)?;
        Ok(MapRegion::centered_meters(user, self.map_span_meters))
    }

    pub fn nearby_stores(&self, user: Coordinate) -> Result<Vec<NearbyStore>, PlacesError> {
        let region = MapRegion::centered_degrees(user, self.search_span_degrees);
        let candidates = self.provider.search(&region, &self.query)?;
        let stores = rank_by_distance(user, candidates);
        debug!("found {} stores near {user}", stores.len());
        Ok(stores)
    }
}

/// Turns raw candidates into stores sorted by ascending distance from `user`.
///
/// Candidates without a name are dropped. Equal distances keep provider order.
pub fn rank_by_distance(user: Coordinate, candidates: Vec<PlaceCandidate>) -> Vec<NearbyStore> {
    let mut stores: Vec<NearbyStore> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let name = candidate.name.filter(|n| !n.is_empty())?;
            Some(NearbyStore {
                name,
                address: candidate.address.unwrap_or_else(|| NO_ADDRESS.to_string()),
                coordinate: candidate.coordinate,
                distance_meters: user.distance_to(&candidate.coordinate),
            })
        })
        .collect();

    stores.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
    stores
}
