//! Region resolver — maps a coordinate to a supported transit system.
//!
//! Linear scan in declaration order. The first region that strictly contains
//! the point wins, even when a later region is a tighter or closer match.

use super::types::{Coordinate, Region, TransitSystem};

// ─── Built-in registry ──────────────────────────────────────────

/// Systems that can be detected from a coordinate. Order is significant.
pub const SUPPORTED_SYSTEMS: &[TransitSystem] = &[
    TransitSystem {
        name: "GO Transit",
        region: Region { lat: 43.65, lon: -79.38, radius: 0.5 }, // Toronto
    },
    TransitSystem {
        name: "TTC",
        region: Region { lat: 43.7, lon: -79.4, radius: 0.2 },
    },
];

/// Systems offered in the manual picker when detection fails.
pub const SELECTABLE_SYSTEMS: &[&str] = &["GO Transit", "TTC", "MTA", "BART"];

// ─── Resolution ─────────────────────────────────────────────────

/// Resolve against the built-in registry.
pub fn resolve_system(lat: f64, lon: f64) -> Option<&'static str> {
    resolve_system_in(SUPPORTED_SYSTEMS, lat, lon)
}

/// Resolve against an arbitrary ordered registry.
///
/// No range validation is done; out-of-range input just matches nothing.
pub fn resolve_system_in(registry: &[TransitSystem], lat: f64, lon: f64) -> Option<&'static str> {
    let point = Coordinate::new(lat, lon);
    registry
        .iter()
        .find(|sys| sys.region.contains(&point))
        .map(|sys| sys.name)
}

/// Whether `name` is one of the manually selectable systems (case-insensitive).
/// Returns the canonical spelling.
pub fn selectable_system(name: &str) -> Option<&'static str> {
    let wanted = name.trim().to_lowercase();
    SELECTABLE_SYSTEMS
        .iter()
        .copied()
        .find(|s| s.to_lowercase() == wanted)
}

/// Whether `name` has a detection region in the built-in registry.
pub fn is_detectable(name: &str) -> bool {
    SUPPORTED_SYSTEMS.iter().any(|s| s.name == name)
}
