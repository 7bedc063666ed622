//! Great-circle distance and compass bearing from the station to an aircraft.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::GeoPoint;

/// Earth radius used for all distance figures (statute miles).
pub const EARTH_RADIUS_MILES: f64 = 3956.0;

/// One of eight 45°-wide direction bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassOctant {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl CompassOctant {
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// Bin a compass bearing in degrees.
    ///
    /// The index is `round(deg / 45) mod 8`; half-way values (22.5°, 67.5°, …)
    /// round up to the next octant. Negative and >360° inputs are normalised.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_degrees(degrees: f64) -> Self {
        let normalized = degrees.rem_euclid(360.0);
        let idx = (normalized / 45.0).round() as usize % 8;
        Self::ALL[idx]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::North => "North",
            Self::NorthEast => "North-East",
            Self::East => "East",
            Self::SouthEast => "South-East",
            Self::South => "South",
            Self::SouthWest => "South-West",
            Self::West => "West",
            Self::NorthWest => "North-West",
        }
    }
}

impl fmt::Display for CompassOctant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Haversine distance in statute miles.
pub fn distance(origin: GeoPoint, point: GeoPoint) -> f64 {
    let lat1 = origin.lat.to_radians();
    let lat2 = point.lat.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (point.lon - origin.lon).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();
    c * EARTH_RADIUS_MILES
}

/// Initial great-circle bearing in degrees, normalised to `[0, 360)`.
///
/// Coincident points give 0° (atan2(0, 0)), i.e. North.
pub fn initial_bearing_degrees(origin: GeoPoint, point: GeoPoint) -> f64 {
    let lat1 = origin.lat.to_radians();
    let lat2 = point.lat.to_radians();
    let dlon = (point.lon - origin.lon).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// Compass octant from `origin` towards `point`.
pub fn bearing(origin: GeoPoint, point: GeoPoint) -> CompassOctant {
    CompassOctant::from_degrees(initial_bearing_degrees(origin, point))
}
