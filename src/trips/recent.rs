//! Bounded, newest-first log of recently planned trips.
//!
//! Stored as a JSON array under a single key. Index 0 is the most recently
//! saved trip regardless of its timestamp. Unreadable data is treated as an
//! empty log and is overwritten on the next save.

use super::storage::Storage;
use super::types::Trip;
use tracing::{debug, warn};

pub const RECENT_TRIPS_KEY: &str = "recentTrips";
pub const MAX_RECENT_TRIPS: usize = 5;

pub struct RecentTrips<S> {
    storage: S,
}

impl<S: Storage> RecentTrips<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Trips exactly as stored, newest first. Never fails.
    pub fn recent_trips(&self) -> Vec<Trip> {
        let Some(raw) = self.storage.read(RECENT_TRIPS_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<Trip>>(&raw) {
            Ok(trips) => trips,
            Err(e) => {
                debug!(key = RECENT_TRIPS_KEY, error = %e, "ignoring unreadable recent trips");
                Vec::new()
            }
        }
    }

    /// Prepend `trip` and keep the newest five. Identical trips are not merged.
    pub fn save_trip(&mut self, trip: Trip) {
        let mut trips = self.recent_trips();
        trips.insert(0, trip);
        trips.truncate(MAX_RECENT_TRIPS);

        let json = match serde_json::to_string(&trips) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "could not encode recent trips");
                return;
            }
        };
        if let Err(e) = self.storage.write(RECENT_TRIPS_KEY, json) {
            warn!(error = %e, "could not persist recent trips");
        }
    }

    /// The trip at 1-based `position` in the log, newest first. `None` for 0
    /// or past the end.
    pub fn recent_trip(&self, position: usize) -> Option<Trip> {
        let index = position.checked_sub(1)?;
        self.recent_trips().into_iter().nth(index)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
