//! Transit-system detection from a coordinate.
//!
//! A fixed, ordered registry of circular catchment regions in raw degrees.

pub mod resolver;
pub mod types;

pub use resolver::{
    is_detectable, resolve_system, resolve_system_in, selectable_system, SELECTABLE_SYSTEMS,
    SUPPORTED_SYSTEMS,
};
pub use types::{Coordinate, Region, TransitSystem};
