//! Search over a fixed, in-memory catalog of places.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::{Config, PlaceEntry};
use crate::map::{Category, Region};

use super::{Place, SearchError, SearchProvider};

/// Answers searches from a list of known places, optionally after a
/// simulated network delay.
pub struct CatalogSearchProvider {
    entries: Vec<PlaceEntry>,
    latency: Duration,
}

impl CatalogSearchProvider {
    pub fn new(entries: Vec<PlaceEntry>) -> Self {
        Self {
            entries,
            latency: Duration::ZERO,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.places.clone())
            .with_latency(Duration::from_millis(config.demo.search_latency_ms))
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl SearchProvider for CatalogSearchProvider {
    async fn search(&self, region: &Region, category: Category) -> Result<Vec<Place>, SearchError> {
        if region.span.latitude_delta <= 0.0 || region.span.longitude_delta <= 0.0 {
            return Err(SearchError::InvalidRegion(*region));
        }

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let places: Vec<Place> = self
            .entries
            .iter()
            .filter(|entry| entry.category == category)
            .filter(|entry| region.contains(&entry.coordinate()))
            .map(PlaceEntry::to_place)
            .collect();

        tracing::debug!(
            category = %category,
            matches = places.len(),
            "Catalog search finished"
        );
        Ok(places)
    }
}
