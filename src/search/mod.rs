//! Place search boundary.

mod catalog;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::map::{Category, Coordinate, Region};

pub use catalog::CatalogSearchProvider;

/// A place as returned by a search provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: Option<String>,
    /// Single-line postal address.
    pub address: Option<String>,
    pub coordinate: Coordinate,
}

/// Errors that can occur during a place search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// Region has a zero or negative span.
    #[error("invalid search region: {0:?}")]
    InvalidRegion(Region),

    /// The backing service could not answer.
    #[error("search service unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Capability contract of a place search service.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Places of `category` inside `region`, in relevance order.
    async fn search(&self, region: &Region, category: Category) -> Result<Vec<Place>, SearchError>;
}
