use crate::trips::{RecentTrips, Storage};
use std::sync::{Mutex, MutexGuard};

pub struct AppState {
    trips: Mutex<RecentTrips<Box<dyn Storage>>>,
}

impl AppState {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self {
            trips: Mutex::new(RecentTrips::new(storage)),
        }
    }

    /// A panicked writer leaves at worst a stale log behind, so poisoning is ignored.
    pub fn trips(&self) -> MutexGuard<'_, RecentTrips<Box<dyn Storage>>> {
        self.trips.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
