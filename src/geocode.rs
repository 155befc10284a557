//! Geocoding: primary lookup with places-search fallback
//!
//! The primary service is Nominatim (free text, no credential). When it
//! yields nothing, or is unreachable, the [`Geocoder`] falls through to the
//! secondary places-search service. A primary outage is treated as "no
//! result", not as a fatal error; there is no retry or caching.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::GeocodingConfig;
use crate::models::Coordinate;
use crate::{Result, TripWeaverError};

/// A service that can turn a free-text query into at most one coordinate.
///
/// `Ok(None)` means the service answered but had no candidate; errors mean
/// the service could not be consulted at all.
#[async_trait]
pub trait GeocodeService: Send + Sync {
    async fn lookup(&self, query: &str) -> Result<Option<Coordinate>>;
}

/// One entry of a Nominatim search response. Nominatim serializes
/// coordinates as strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

/// Nominatim search client, the primary geocoding service
pub struct NominatimClient {
    client: Client,
    base_url: String,
}

impl NominatimClient {
    /// Create a new client from the geocoding configuration
    pub fn new(config: &GeocodingConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TripWeaverError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl GeocodeService for NominatimClient {
    async fn lookup(&self, query: &str) -> Result<Option<Coordinate>> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(query)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TripWeaverError::network(format!("Nominatim request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(TripWeaverError::network(format!(
                "Nominatim returned HTTP {}",
                response.status()
            )));
        }

        let places: Vec<NominatimPlace> = response.json().await.map_err(|e| {
            TripWeaverError::network(format!("Failed to parse Nominatim response: {e}"))
        })?;

        let Some(place) = places.into_iter().next() else {
            debug!("Nominatim has no match for '{}'", query);
            return Ok(None);
        };

        let lat = place.lat.parse::<f64>().map_err(|e| {
            TripWeaverError::network(format!("Invalid latitude in Nominatim response: {e}"))
        })?;
        let lon = place.lon.parse::<f64>().map_err(|e| {
            TripWeaverError::network(format!("Invalid longitude in Nominatim response: {e}"))
        })?;

        Ok(Some(Coordinate::new(lat, lon)?))
    }
}

/// Two-tier geocoder: primary service first, places-search fallback second.
///
/// The first match wins; there is no disambiguation. At most two outbound
/// calls are made per resolution, and none after a primary hit.
pub struct Geocoder {
    primary: Arc<dyn GeocodeService>,
    secondary: Arc<dyn GeocodeService>,
}

impl Geocoder {
    pub fn new(primary: Arc<dyn GeocodeService>, secondary: Arc<dyn GeocodeService>) -> Self {
        Self { primary, secondary }
    }

    /// Resolve a free-text address or place description to a coordinate.
    ///
    /// Fails with [`TripWeaverError::AddressNotFound`] when neither service
    /// yields a candidate. Transport failures of either service are treated
    /// as a miss for that service.
    #[instrument(skip(self))]
    pub async fn resolve(&self, address: &str) -> Result<Coordinate> {
        if address.trim().is_empty() {
            return Err(TripWeaverError::validation("Address cannot be empty"));
        }

        match self.primary.lookup(address).await {
            Ok(Some(coordinate)) => {
                debug!(
                    "Primary geocoder resolved '{}' to {}",
                    address,
                    coordinate.format_coordinates()
                );
                return Ok(coordinate);
            }
            Ok(None) => {
                debug!("Primary geocoder has no match for '{}', trying fallback", address);
            }
            Err(e) => {
                warn!("Primary geocoder failed for '{}': {}", address, e);
            }
        }

        match self.secondary.lookup(address).await {
            Ok(Some(coordinate)) => {
                debug!(
                    "Fallback geocoder resolved '{}' to {}",
                    address,
                    coordinate.format_coordinates()
                );
                Ok(coordinate)
            }
            Ok(None) => Err(TripWeaverError::address_not_found(address)),
            Err(e) => {
                warn!("Fallback geocoder failed for '{}': {}", address, e);
                Err(TripWeaverError::address_not_found(address))
            }
        }
    }
}
