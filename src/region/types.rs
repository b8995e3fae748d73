//! Core types for transit-system regions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in raw latitude/longitude degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Flat Euclidean distance in degrees. Not a geodesic distance.
    pub fn degree_distance(&self, other: &Coordinate) -> f64 {
        ((self.lat - other.lat).powi(2) + (self.lon - other.lon).powi(2)).sqrt()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.lat >= 0.0 { 'N' } else { 'S' };
        let ew = if self.lon >= 0.0 { 'E' } else { 'W' };
        write!(f, "{:.4}\u{00B0}{}, {:.4}\u{00B0}{}", self.lat.abs(), ns, self.lon.abs(), ew)
    }
}

/// Circular catchment around a center point; `radius` is in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Region {
    pub lat: f64,
    pub lon: f64,
    pub radius: f64,
}

impl Region {
    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }

    /// Strictly inside: a point exactly on the boundary is outside.
    pub fn contains(&self, point: &Coordinate) -> bool {
        self.center().degree_distance(point) < self.radius
    }
}

/// A named transit network and the region it serves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransitSystem {
    pub name: &'static str,
    pub region: Region,
}
