//! Nearby-place lookups against the Google Places API.
//!
//! Two-step flow: geocode the destination with a find-place text query, then
//! nearby-search around that point. Every failure mode collapses to an empty
//! list; planning continues without live place names.

use reqwest;
use serde::{Deserialize, Serialize};
use std::{env, fmt, time::Duration};

const PLACES_API_BASE: &str = "https://maps.googleapis.com/maps/api/place";
const SEARCH_RADIUS_METERS: u32 = 5000;
const MAX_RESULTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceCategory {
    Lodging,
    Attraction,
    Restaurant,
}

impl PlaceCategory {
    fn as_str(&self) -> &str {
        match self {
            PlaceCategory::Lodging => "lodging",
            PlaceCategory::Attraction => "tourist_attraction",
            PlaceCategory::Restaurant => "restaurant",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceResult {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ratings_total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct FindPlaceResponse {
    status: String,
    #[serde(default)]
    candidates: Vec<FindPlaceCandidate>,
}

#[derive(Debug, Deserialize)]
struct FindPlaceCandidate {
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<NearbyPlace>,
}

#[derive(Debug, Deserialize)]
struct NearbyPlace {
    name: Option<String>,
    rating: Option<f64>,
    price_level: Option<u32>,
    user_ratings_total: Option<u64>,
    types: Option<Vec<String>>,
}

#[derive(Debug)]
pub enum PlacesError {
    EnvironmentError(String),
    HttpError(reqwest::Error),
    ResponseError(String),
}

impl fmt::Display for PlacesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacesError::EnvironmentError(msg) => write!(f, "Environment error: {}", msg),
            PlacesError::HttpError(err) => write!(f, "HTTP error: {}", err),
            PlacesError::ResponseError(msg) => write!(f, "Response error: {}", msg),
        }
    }
}

impl std::error::Error for PlacesError {}

impl From<reqwest::Error> for PlacesError {
    fn from(err: reqwest::Error) -> Self {
        PlacesError::HttpError(err)
    }
}

pub struct PlacesService {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl PlacesService {
    pub fn new() -> Result<Self, PlacesError> {
        let api_key = env::var("GOOGLE_MAPS_API_KEY").map_err(|_| {
            PlacesError::EnvironmentError(
                "GOOGLE_MAPS_API_KEY environment variable not set".to_string(),
            )
        })?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http_client,
            api_key,
            base_url: PLACES_API_BASE.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Up to ten named places of one category around the destination.
    /// Empty on any failure.
    pub async fn nearby(&self, destination: &str, category: PlaceCategory) -> Vec<PlaceResult> {
        match self.try_nearby(destination, category).await {
            Ok(results) => results,
            Err(e) => {
                println!(
                    "No {} results near {}: {}",
                    category.as_str(),
                    destination,
                    e
                );
                Vec::new()
            }
        }
    }

    /// All three categories, fetched concurrently.
    pub async fn nearby_all(
        &self,
        destination: &str,
    ) -> (Vec<PlaceResult>, Vec<PlaceResult>, Vec<PlaceResult>) {
        futures::join!(
            self.nearby(destination, PlaceCategory::Lodging),
            self.nearby(destination, PlaceCategory::Attraction),
            self.nearby(destination, PlaceCategory::Restaurant),
        )
    }

    async fn try_nearby(
        &self,
        destination: &str,
        category: PlaceCategory,
    ) -> Result<Vec<PlaceResult>, PlacesError> {
        let location = self.geocode(destination).await?;

        let url = format!("{}/nearbysearch/json", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("location", format!("{},{}", location.lat, location.lng)),
                ("radius", SEARCH_RADIUS_METERS.to_string()),
                ("type", category.as_str().to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?;

        let search: NearbySearchResponse = response.json().await.map_err(|e| {
            PlacesError::ResponseError(format!("Failed to parse nearby search response: {}", e))
        })?;

        if search.status != "OK" {
            return Err(PlacesError::ResponseError(format!(
                "Nearby search error: {}",
                search.status
            )));
        }

        let mut results: Vec<PlaceResult> = search
            .results
            .into_iter()
            .map(|place| PlaceResult {
                name: place.name.unwrap_or_else(|| "Unknown".to_string()),
                rating: place.rating,
                price_level: place.price_level,
                user_ratings_total: place.user_ratings_total,
                types: place.types,
            })
            .collect();
        results.truncate(MAX_RESULTS);

        Ok(results)
    }

    async fn geocode(&self, destination: &str) -> Result<LatLng, PlacesError> {
        let url = format!("{}/findplacefromtext/json", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("input", destination),
                ("inputtype", "textquery"),
                ("fields", "geometry"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let found: FindPlaceResponse = response.json().await.map_err(|e| {
            PlacesError::ResponseError(format!("Failed to parse find-place response: {}", e))
        })?;

        if found.status != "OK" {
            return Err(PlacesError::ResponseError(format!(
                "Could not geocode destination {}: {}",
                destination, found.status
            )));
        }

        found
            .candidates
            .into_iter()
            .find_map(|c| c.geometry)
            .map(|g| g.location)
            .ok_or_else(|| {
                PlacesError::ResponseError(format!(
                    "Could not geocode destination {}: no geometry",
                    destination
                ))
            })
    }
}
