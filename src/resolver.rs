//! Batch place resolution
//!
//! Resolves each generated place to a coordinate (via the two-tier
//! [`Geocoder`]) and a best-effort imagery reference. Places are
//! independent, so resolution fans out over a small bounded pool; results
//! are index-tagged and reassembled in input order. One place failing never
//! aborts the batch.

use std::sync::Arc;

use futures::StreamExt;
use futures::stream;
use tracing::{debug, instrument, warn};

use crate::geocode::Geocoder;
use crate::models::{Place, PlaceSeed};
use crate::places::ImageryService;

/// Build the geocoding query for a place within its location context.
///
/// The name and context are joined with an explicit ", " delimiter so the
/// tokens cannot collide.
fn composite_query(name: &str, location_context: &str) -> String {
    format!("{name}, {location_context}")
}

/// Resolves batches of generated places to coordinates and imagery
pub struct PlaceResolver {
    geocoder: Geocoder,
    imagery: Arc<dyn ImageryService>,
    concurrency: usize,
}

impl PlaceResolver {
    pub fn new(geocoder: Geocoder, imagery: Arc<dyn ImageryService>, concurrency: usize) -> Self {
        Self {
            geocoder,
            imagery,
            concurrency: concurrency.max(1),
        }
    }

    /// Resolve a batch of place seeds within a location context.
    ///
    /// The returned places are in the same order as `seeds`, regardless of
    /// which resolutions finished first. A geocoding failure leaves that
    /// place's `coordinate` as `None`; an imagery failure leaves `image_url`
    /// as `None`; neither stops the other places from resolving.
    #[instrument(skip(self, seeds), fields(batch_size = seeds.len()))]
    pub async fn resolve_all(&self, location_context: &str, seeds: &[PlaceSeed]) -> Vec<Place> {
        let mut resolved: Vec<(usize, Place)> = stream::iter(seeds.iter().enumerate())
            .map(|(index, seed)| async move {
                (index, self.resolve_one(location_context, seed).await)
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        // buffer_unordered yields in completion order; restore input order
        resolved.sort_by_key(|(index, _)| *index);
        resolved.into_iter().map(|(_, place)| place).collect()
    }

    async fn resolve_one(&self, location_context: &str, seed: &PlaceSeed) -> Place {
        let query = composite_query(&seed.name, location_context);

        let coordinate = match self.geocoder.resolve(&query).await {
            Ok(coordinate) => Some(coordinate),
            Err(e) => {
                warn!("Could not resolve '{}': {}", seed.name, e);
                None
            }
        };

        let image_url = self.imagery.static_map_url(&query).await;
        if image_url.is_none() {
            debug!("No imagery for '{}'", seed.name);
        }

        Place {
            name: seed.name.clone(),
            description: seed.description.clone(),
            coordinate,
            image_url,
        }
    }
}
