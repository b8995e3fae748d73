//! Wire types for the recommendation backend.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Stop identifiers are strings from the scraper ("ttc:kipling") or integers
/// from the database fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StopId {
    Number(i64),
    Text(String),
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StopLocation {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

/// A station belonging to a transit system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    #[serde(default)]
    pub line: Option<String>,
    #[serde(default)]
    pub system: Option<String>,
    #[serde(default)]
    pub location: Option<StopLocation>,
}

/// One car, several equally good cars, or a free-form label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CarChoice {
    One(u32),
    Many(Vec<u32>),
    Label(String),
}

impl fmt::Display for CarChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One(n) => write!(f, "{}", n),
            Self::Many(cars) => {
                let cars: Vec<String> = cars.iter().map(|c| c.to_string()).collect();
                write!(f, "{}", cars.join(" or "))
            }
            Self::Label(s) => write!(f, "{}", s),
        }
    }
}

/// Best-car answer for an origin/destination pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub car: Option<CarChoice>,
    /// Older backends answer with `recommended_car` instead of `car`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_car: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit: Option<String>,
}

impl Recommendation {
    /// The car to board, whichever field carried it.
    pub fn car_label(&self) -> Option<String> {
        self.car
            .as_ref()
            .map(|c| c.to_string())
            .or_else(|| self.recommended_car.clone())
    }

    pub fn display_line(&self) -> String {
        let mut out = match self.car_label() {
            Some(car) => format!("Recommended Car: {}", car),
            None => "No result available".to_string(),
        };
        if let Some(ref notes) = self.notes {
            out.push_str(&format!("\n  {}", notes));
        }
        if let Some(ref explanation) = self.explanation {
            out.push_str(&format!("\n  {}", explanation));
        }
        out
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct HealthBody {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

/// Backend request errors.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Backend returned {code}: {message}")]
    Status { code: u16, message: String },

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_from_scraper() {
        let stop: Stop = serde_json::from_str(
            r#"{"id":"ttc:kipling","name":"Kipling","line":"Line 2","location":{"lat":43.636,"lon":-79.535}}"#,
        )
        .unwrap();
        assert_eq!(stop.id, StopId::Text("ttc:kipling".into()));
        assert_eq!(stop.location.and_then(|l| l.lat), Some(43.636));
    }

    #[test]
    fn test_stop_from_database() {
        let stop: Stop = serde_json::from_str(
            r#"{"id":3,"name":"Yorkdale","line":"TTC","system":"TTC","location":null}"#,
        )
        .unwrap();
        assert_eq!(stop.id, StopId::Number(3));
        assert!(stop.location.is_none());
        assert_eq!(stop.id.to_string(), "3");
    }

    #[test]
    fn test_car_choice_display() {
        assert_eq!(CarChoice::One(3).to_string(), "3");
        assert_eq!(CarChoice::Many(vec![2, 3]).to_string(), "2 or 3");
    }

    #[test]
    fn test_recommendation_with_car_list() {
        let rec: Recommendation = serde_json::from_str(
            r#"{"station":"union station","exit":"york concourse","car":[2,3],
                "notes":"Both cars 2 and 3 are near the York Concourse escalators."}"#,
        )
        .unwrap();
        assert_eq!(rec.car_label().as_deref(), Some("2 or 3"));
        assert!(rec.display_line().contains("York Concourse"));
    }

    #[test]
    fn test_recommendation_legacy_field() {
        let rec: Recommendation = serde_json::from_str(
            r#"{"station":"MainStreet","exit":"Union","recommended_car":"3"}"#,
        )
        .unwrap();
        assert_eq!(rec.car_label().as_deref(), Some("3"));
        assert_eq!(rec.display_line(), "Recommended Car: 3");
    }

    #[test]
    fn test_status_code() {
        let err = ApiError::Status { code: 404, message: "Station 'x' not found".into() };
        assert_eq!(err.status_code(), Some(404));
        assert!(err.to_string().contains("not found"));
        assert_eq!(ApiError::Transport("refused".into()).status_code(), None);
    }
}
