//! Recent-trips history.
//!
//! Provides the trip record, the key/value storage capability, and the
//! bounded newest-first log kept on top of it.

pub mod recent;
pub mod storage;
pub mod types;

pub use recent::{RecentTrips, MAX_RECENT_TRIPS, RECENT_TRIPS_KEY};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use types::{StorageError, Trip};
