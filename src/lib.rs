//! bestcar — pick the best subway/train car to board.
//!
//! Detects the transit system from a coordinate, keeps a short history of
//! recently planned trips, and asks the backend which car to board.

pub mod backend;
pub mod region;
pub mod server;
pub mod stops;
pub mod trips;
