//! Distance lookups against the Google Distance Matrix API.
//!
//! Origin and destination are free-text location strings; geocoding is the
//! API's problem. Callers that can tolerate a missing answer (ride pricing)
//! substitute their own fallback rather than surfacing errors.

use reqwest;
use serde::Deserialize;
use std::{env, fmt, time::Duration};

const DISTANCE_MATRIX_URL: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";

#[derive(Debug, Deserialize)]
struct DistanceMatrixResponse {
    status: String,
    #[serde(default)]
    rows: Vec<DistanceMatrixRow>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixRow {
    elements: Vec<DistanceMatrixElement>,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixElement {
    status: String,
    distance: Option<MatrixValue>,
    duration: Option<MatrixValue>,
}

#[derive(Debug, Deserialize)]
struct MatrixValue {
    value: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct DistanceResult {
    pub distance_meters: u32,
    pub duration_seconds: u32,
}

impl DistanceResult {
    pub fn distance_km(&self) -> f64 {
        f64::from(self.distance_meters) / 1000.0
    }

    pub fn duration_minutes(&self) -> f64 {
        f64::from(self.duration_seconds) / 60.0
    }
}

#[derive(Debug)]
pub enum DistanceError {
    EnvironmentError(String),
    HttpError(reqwest::Error),
    ResponseError(String),
}

impl fmt::Display for DistanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceError::EnvironmentError(msg) => write!(f, "Environment error: {}", msg),
            DistanceError::HttpError(err) => write!(f, "HTTP error: {}", err),
            DistanceError::ResponseError(msg) => write!(f, "Response error: {}", msg),
        }
    }
}

impl std::error::Error for DistanceError {}

impl From<reqwest::Error> for DistanceError {
    fn from(err: reqwest::Error) -> Self {
        DistanceError::HttpError(err)
    }
}

pub struct DistanceService {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl DistanceService {
    pub fn new() -> Result<Self, DistanceError> {
        let api_key = env::var("GOOGLE_MAPS_API_KEY").map_err(|_| {
            DistanceError::EnvironmentError(
                "GOOGLE_MAPS_API_KEY environment variable not set".to_string(),
            )
        })?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http_client,
            api_key,
            base_url: DISTANCE_MATRIX_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Road distance and travel time between two free-text locations.
    pub async fn get_distance(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<DistanceResult, DistanceError> {
        println!("Fetching distance from {} to {}", origin, destination);

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[
                ("origins", origin),
                ("destinations", destination),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let response_text = response.text().await?;
        let matrix: DistanceMatrixResponse = serde_json::from_str(&response_text).map_err(|e| {
            DistanceError::ResponseError(format!(
                "Failed to parse Distance Matrix response: {}. Response: {}",
                e, response_text
            ))
        })?;

        if matrix.status != "OK" {
            return Err(DistanceError::ResponseError(format!(
                "Distance Matrix API error: {}{}",
                matrix.status,
                matrix
                    .error_message
                    .map(|m| format!(" ({})", m))
                    .unwrap_or_default()
            )));
        }

        if matrix.rows.is_empty() || matrix.rows[0].elements.is_empty() {
            return Err(DistanceError::ResponseError(
                "No distance data returned".to_string(),
            ));
        }

        let element = &matrix.rows[0].elements[0];
        if element.status != "OK" {
            return Err(DistanceError::ResponseError(format!(
                "Distance Matrix element error: {}",
                element.status
            )));
        }

        let distance = element
            .distance
            .as_ref()
            .ok_or_else(|| DistanceError::ResponseError("Distance not available".to_string()))?;
        let duration = element
            .duration
            .as_ref()
            .ok_or_else(|| DistanceError::ResponseError("Duration not available".to_string()))?;

        Ok(DistanceResult {
            distance_meters: distance.value,
            duration_seconds: duration.value,
        })
    }
}
