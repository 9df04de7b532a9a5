use serde::{Deserialize, Serialize};
use std::fmt;

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A WGS84 latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinate {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance in meters (haversine on a spherical earth).
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = lat2 - lat1;
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_METERS * a.sqrt().atan2((1.0 - a).sqrt())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

/// A rectangular map area given by its center and span in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    pub center: Coordinate,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl MapRegion {
    pub fn centered_degrees(center: Coordinate, span_degrees: f64) -> Self {
        MapRegion {
            center,
            latitude_delta: span_degrees,
            longitude_delta: span_degrees,
        }
    }

    /// Region spanning `span_meters` north-south and east-west around `center`.
    pub fn centered_meters(center: Coordinate, span_meters: f64) -> Self {
        let meters_per_degree = EARTH_RADIUS_METERS.to_radians();
        let latitude_delta = span_meters / meters_per_degree;
        let cos_lat = center.latitude.to_radians().cos().abs().max(f64::EPSILON);
        MapRegion {
            center,
            latitude_delta,
            longitude_delta: latitude_delta / cos_lat,
        }
    }
}

/// A raw result from the host's place search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub coordinate: Coordinate,
}

/// A named store with its distance from the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyStore {
    pub name: String,
    pub address: String,
    pub coordinate: Coordinate,
    pub distance_meters: f64,
}
