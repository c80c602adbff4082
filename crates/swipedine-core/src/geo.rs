//! Coordinates and great-circle distance.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::restaurant::Restaurant;

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Haversine distance between two coordinates in meters.
///
/// Deterministic and symmetric; identical points yield exactly `0.0`. The
/// half-angle form stays numerically stable for separations well below a
/// meter, which matters more here than raw speed (candidate lists are small).
#[must_use]
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let to_rad = |deg: f64| deg * PI / 180.0;

    let dlat = to_rad(b.latitude - a.latitude);
    let dlng = to_rad(b.longitude - a.longitude);

    let h = (dlat / 2.0).sin().powi(2)
        + to_rad(a.latitude).cos() * to_rad(b.latitude).cos() * (dlng / 2.0).sin().powi(2);

    let c = 2.0 * h.sqrt().asin();
    EARTH_RADIUS_METERS * c
}

/// Fills in `distance_meters` for every restaurant, measured from `origin`.
///
/// Records without a coordinate are annotated with `0.0` so downstream
/// filtering stays total instead of special-casing missing geometry.
pub fn annotate_distances(restaurants: &mut [Restaurant], origin: Coordinate) {
    for restaurant in restaurants {
        let distance = restaurant
            .coordinate
            .map_or(0.0, |coordinate| distance_meters(origin, coordinate));
        restaurant.distance_meters = Some(distance);
    }
}
