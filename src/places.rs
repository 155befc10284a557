//! Places-search and static-imagery client
//!
//! Wraps the Google Places find-place-from-text endpoint (used as the
//! fallback geocoder) and the Static Maps endpoint (used for best-effort
//! place imagery). Both require an API key; without one the client degrades
//! to "no candidate" / "no image" instead of failing.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::PlacesConfig;
use crate::geocode::GeocodeService;
use crate::models::Coordinate;
use crate::{Result, TripWeaverError};

/// A service that resolves a free-text query to a static image reference.
///
/// Best-effort by contract: any failure is reported as `None`, never as an
/// error that could abort a resolution batch.
#[async_trait]
pub trait ImageryService: Send + Sync {
    async fn static_map_url(&self, query: &str) -> Option<String>;
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct CandidateGeometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct PlaceCandidate {
    #[allow(dead_code)]
    name: Option<String>,
    geometry: CandidateGeometry,
}

#[derive(Debug, Deserialize)]
struct FindPlaceResponse {
    candidates: Option<Vec<PlaceCandidate>>,
}

/// Google Places / Static Maps API client
pub struct GooglePlacesClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    static_map_base_url: String,
    map_zoom: u32,
    map_size: String,
}

impl GooglePlacesClient {
    /// Create a new client from the places configuration
    pub fn new(config: &PlacesConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent("TripWeaver/0.1.0")
            .build()
            .map_err(|e| TripWeaverError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            static_map_base_url: config.static_map_base_url.clone(),
            map_zoom: config.map_zoom,
            map_size: config.map_size.clone(),
        })
    }

    /// Find the first place candidate for a free-text query.
    ///
    /// Returns `Ok(None)` when no API key is configured or the candidate
    /// list is empty or absent.
    async fn find_place(&self, query: &str) -> Result<Option<Coordinate>> {
        let Some(api_key) = &self.api_key else {
            debug!("No places API key configured, skipping find-place lookup");
            return Ok(None);
        };

        let url = format!(
            "{}/findplacefromtext/json?input={}&inputtype=textquery&fields=geometry,name&key={}",
            self.base_url,
            urlencoding::encode(query),
            api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TripWeaverError::network(format!("Places request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(TripWeaverError::network(format!(
                "Places API returned HTTP {}",
                response.status()
            )));
        }

        let find_place: FindPlaceResponse = response.json().await.map_err(|e| {
            TripWeaverError::network(format!("Failed to parse places response: {e}"))
        })?;

        let Some(candidate) = find_place
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
        else {
            debug!("Places API has no candidate for '{}'", query);
            return Ok(None);
        };

        let coordinate = Coordinate::new(
            candidate.geometry.location.lat,
            candidate.geometry.location.lng,
        )?;
        Ok(Some(coordinate))
    }

    fn format_static_map_url(&self, coordinate: &Coordinate, api_key: &str) -> String {
        format!(
            "{}?center={},{}&zoom={}&size={}&maptype=satellite&key={}",
            self.static_map_base_url,
            coordinate.latitude,
            coordinate.longitude,
            self.map_zoom,
            self.map_size,
            api_key
        )
    }
}

#[async_trait]
impl GeocodeService for GooglePlacesClient {
    async fn lookup(&self, query: &str) -> Result<Option<Coordinate>> {
        self.find_place(query).await
    }
}

#[async_trait]
impl ImageryService for GooglePlacesClient {
    async fn static_map_url(&self, query: &str) -> Option<String> {
        let api_key = self.api_key.clone()?;

        match self.find_place(query).await {
            Ok(Some(coordinate)) => Some(self.format_static_map_url(&coordinate, &api_key)),
            Ok(None) => None,
            Err(e) => {
                warn!("Imagery lookup failed for '{}': {}", query, e);
                None
            }
        }
    }
}
