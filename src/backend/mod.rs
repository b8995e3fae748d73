//! HTTP client for the best-car backend.
//!
//! The recommendation itself is computed server-side; this module only knows
//! the request and response shapes.

pub mod client;
pub mod types;

pub use client::{BackendClient, DEFAULT_API_URL};
pub use types::{ApiError, CarChoice, Recommendation, Stop, StopId, StopLocation};
