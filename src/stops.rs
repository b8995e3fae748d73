//! Stop filtering and origin/destination selection.
//!
//! A stop already chosen for one end of the trip cannot be picked for the
//! other end. Stops are compared by id.

use crate::backend::Stop;
use crate::trips::Trip;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum End {
    Origin,
    Destination,
}

impl std::fmt::Display for End {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            End::Origin => write!(f, "origin"),
            End::Destination => write!(f, "destination"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("'{name}' is already selected as {other}")]
    AlreadySelected { name: String, other: End },

    #[error("No stop named '{0}'")]
    UnknownStop(String),

    #[error("Select both an origin and a destination")]
    Incomplete,
}

/// Stops whose name contains `query`, case-insensitive. Order is preserved.
/// The query is matched as typed, surrounding whitespace included.
pub fn filter_stops<'a>(stops: &'a [Stop], query: &str) -> Vec<&'a Stop> {
    let q = query.to_lowercase();
    stops
        .iter()
        .filter(|s| s.name.to_lowercase().contains(&q))
        .collect()
}

/// Exact name lookup, case-insensitive.
pub fn find_stop<'a>(stops: &'a [Stop], name: &str) -> Result<&'a Stop, SelectionError> {
    let wanted = name.trim().to_lowercase();
    stops
        .iter()
        .find(|s| s.name.to_lowercase() == wanted)
        .ok_or_else(|| SelectionError::UnknownStop(name.to_string()))
}

#[derive(Debug, Clone, Default)]
pub struct Selection {
    origin: Option<Stop>,
    destination: Option<Stop>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(&self) -> Option<&Stop> {
        self.origin.as_ref()
    }

    pub fn destination(&self) -> Option<&Stop> {
        self.destination.as_ref()
    }

    pub fn select(&mut self, end: End, stop: Stop) -> Result<(), SelectionError> {
        let (slot, other, other_end) = match end {
            End::Origin => (&mut self.origin, &self.destination, End::Destination),
            End::Destination => (&mut self.destination, &self.origin, End::Origin),
        };
        if other.as_ref().is_some_and(|o| o.id == stop.id) {
            return Err(SelectionError::AlreadySelected { name: stop.name, other: other_end });
        }
        *slot = Some(stop);
        Ok(())
    }

    /// Both ends chosen: a trip stamped now.
    pub fn confirm(&self) -> Result<Trip, SelectionError> {
        match (&self.origin, &self.destination) {
            (Some(o), Some(d)) => Ok(Trip::new(o.name.clone(), d.name.clone())),
            _ => Err(SelectionError::Incomplete),
        }
    }

    pub fn clear(&mut self) {
        self.origin = None;
        self.destination = None;
    }
}
