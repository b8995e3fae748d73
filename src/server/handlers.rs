use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::region::{is_detectable, resolve_system, SELECTABLE_SYSTEMS};
use crate::trips::Trip;

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

// ─── GET /api/health ─────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// ─── GET /api/system ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SystemQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

#[derive(Serialize)]
pub struct SystemResponse {
    pub system: Option<&'static str>,
    /// True when the caller should fall back to manual selection.
    pub manual: bool,
}

pub(super) async fn detect_system(
    Query(params): Query<SystemQuery>,
) -> Result<Json<SystemResponse>, ApiError> {
    let lat = parse_coord("lat", params.lat.as_deref())?;
    let lon = parse_coord("lon", params.lon.as_deref())?;

    let system = resolve_system(lat, lon);
    info!(lat, lon, system = system.unwrap_or("-"), "GET /api/system");

    Ok(Json(SystemResponse { system, manual: system.is_none() }))
}

// ─── GET /api/systems ────────────────────────────────────────────

#[derive(Serialize)]
pub struct SystemInfo {
    pub name: &'static str,
    pub detectable: bool,
}

#[derive(Serialize)]
pub struct SystemsResponse {
    pub systems: Vec<SystemInfo>,
}

pub async fn system_list() -> Json<SystemsResponse> {
    Json(SystemsResponse {
        systems: SELECTABLE_SYSTEMS
            .iter()
            .map(|&name| SystemInfo { name, detectable: is_detectable(name) })
            .collect(),
    })
}

// ─── /api/recent_trips ───────────────────────────────────────────

pub async fn recent_trips(State(state): State<Arc<AppState>>) -> Json<Vec<Trip>> {
    Json(state.trips().recent_trips())
}

#[derive(Deserialize)]
pub struct NewTrip {
    pub start: String,
    pub destination: String,
    /// Epoch milliseconds; stamped on arrival when absent.
    #[serde(default)]
    pub timestamp: Option<i64>,
}

pub(super) async fn save_trip(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewTrip>,
) -> Result<(StatusCode, Json<Vec<Trip>>), ApiError> {
    let start = Instant::now();

    if body.start.trim().is_empty() || body.destination.trim().is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Both 'start' and 'destination' are required",
        ));
    }

    let trip = match body.timestamp {
        Some(ts) => Trip::at(body.start, body.destination, ts),
        None => Trip::new(body.start, body.destination),
    };
    let route = trip.route_line();

    // FileStorage rewrites its file on every save; keep that off the async workers.
    let trips = tokio::task::spawn_blocking(move || {
        let mut store = state.trips();
        store.save_trip(trip);
        store.recent_trips()
    })
    .await
    .map_err(|e| {
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Saving trip failed: {}", e),
        )
    })?;

    info!(
        %route,
        count = trips.len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "POST /api/recent_trips"
    );

    Ok((StatusCode::CREATED, Json(trips)))
}

// ─── Helpers ─────────────────────────────────────────────────────

fn parse_coord(name: &str, raw: Option<&str>) -> Result<f64, ApiError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, format!("Missing '{}' parameter", name)))?;
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            api_error(
                StatusCode::BAD_REQUEST,
                format!("Invalid '{}' value '{}'", name, raw),
            )
        })
}
