//! Trip record and storage error types.

use chrono::{Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A confirmed origin/destination pair.
///
/// `timestamp` is epoch milliseconds. Never mutated once saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    pub start: String,
    pub destination: String,
    pub timestamp: i64,
}

impl Trip {
    /// A trip stamped with the current time.
    pub fn new(start: impl Into<String>, destination: impl Into<String>) -> Self {
        Self::at(start, destination, Utc::now().timestamp_millis())
    }

    pub fn at(start: impl Into<String>, destination: impl Into<String>, timestamp: i64) -> Self {
        Self {
            start: start.into(),
            destination: destination.into(),
            timestamp,
        }
    }

    /// "Union Station → St George"
    pub fn route_line(&self) -> String {
        format!("{} \u{2192} {}", self.start, self.destination)
    }

    /// Route plus the local time it was saved.
    pub fn display_line(&self) -> String {
        match Local.timestamp_millis_opt(self.timestamp).single() {
            Some(dt) => format!("{} ({})", self.route_line(), dt.format("%Y-%m-%d %H:%M")),
            None => self.route_line(),
        }
    }
}

/// Errors from a storage backend write.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
