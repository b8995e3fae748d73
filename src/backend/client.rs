//! Blocking client for the stops and best-car endpoints.

use super::types::{ApiError, ErrorBody, HealthBody, Recommendation, Stop};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

const USER_AGENT: &str = concat!("bestcar/", env!("CARGO_PKG_VERSION"));

pub struct BackendClient {
    base_url: String,
    timeout: Duration,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// GET /api/health, returning the reported status.
    pub fn health(&self) -> Result<String, ApiError> {
        let body: HealthBody = self.get_json("/api/health", &[])?;
        Ok(body.status)
    }

    /// GET /api/stops for one system. A body that is not an array yields no stops.
    pub fn stops(&self, system: &str) -> Result<Vec<Stop>, ApiError> {
        let value: serde_json::Value = self.get_json("/api/stops", &[("system", system)])?;
        if !value.is_array() {
            debug!(system, "stops response was not an array");
            return Ok(Vec::new());
        }
        serde_json::from_value(value).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// GET /api/best_car for an origin/destination pair.
    pub fn best_car(
        &self,
        origin: &str,
        destination: &str,
        system: &str,
    ) -> Result<Recommendation, ApiError> {
        self.get_json(
            "/api/best_car",
            &[("origin", origin), ("destination", destination), ("system", system)],
        )
    }

    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = ureq::get(&url)
            .set("User-Agent", USER_AGENT)
            .timeout(self.timeout);
        for (key, value) in query {
            request = request.query(key, value);
        }

        debug!(%url, ?query, "backend request");

        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let message = response
                    .into_json::<ErrorBody>()
                    .map(|b| b.error)
                    .unwrap_or_else(|_| "no error message".to_string());
                return Err(ApiError::Status { code, message });
            }
            Err(e) => return Err(ApiError::Transport(e.to_string())),
        };

        response
            .into_json()
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}
