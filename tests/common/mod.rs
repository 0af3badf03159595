//! Shared test utilities and mock providers.

#![allow(dead_code, unused_imports)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use nearby::location::{AuthorizationStatus, SimulatedLocationProvider};
use nearby::map::{Category, Coordinate, MapReducer, PointOfInterest, Region, Span};
use nearby::search::{Place, SearchError, SearchProvider};
use parking_lot::Mutex;
use tokio::sync::oneshot;

pub const TIMEOUT: Duration = Duration::from_secs(5);

pub fn reducer(status: AuthorizationStatus) -> MapReducer {
    MapReducer::new(Arc::new(SimulatedLocationProvider::new(status, None)))
}

pub fn region(latitude: f64, longitude: f64) -> Region {
    Region::new(Coordinate::new(latitude, longitude), Span::square(0.05))
}

pub fn place(name: &str, address: &str, latitude: f64, longitude: f64) -> Place {
    Place {
        name: Some(name.to_string()),
        address: Some(address.to_string()),
        coordinate: Coordinate::new(latitude, longitude),
    }
}

pub fn poi(name: &str, address: &str, latitude: f64, longitude: f64) -> PointOfInterest {
    place(name, address, latitude, longitude).into()
}

/// A search call waiting for the test to answer it.
pub struct PendingSearch {
    pub region: Region,
    pub category: Category,
    respond: oneshot::Sender<Result<Vec<Place>, SearchError>>,
}

impl PendingSearch {
    /// Returns false if the caller already gave up on this search.
    pub fn respond(self, result: Result<Vec<Place>, SearchError>) -> bool {
        self.respond.send(result).is_ok()
    }
}

/// Search provider whose calls block until the test responds to them.
#[derive(Default)]
pub struct GatedSearch {
    pending: Mutex<Vec<PendingSearch>>,
    calls: Mutex<Vec<(Region, Category)>>,
}

impl GatedSearch {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<(Region, Category)> {
        self.calls.lock().clone()
    }

    /// Wait until a call for `region` arrives and take it.
    pub async fn next_call(&self, region: Region) -> PendingSearch {
        tokio::time::timeout(TIMEOUT, async {
            loop {
                if let Some(found) = self.take(&region) {
                    return found;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("search call expected")
    }

    pub fn take(&self, region: &Region) -> Option<PendingSearch> {
        let mut pending = self.pending.lock();
        let index = pending.iter().position(|p| &p.region == region)?;
        Some(pending.remove(index))
    }
}

#[async_trait]
impl SearchProvider for GatedSearch {
    async fn search(&self, region: &Region, category: Category) -> Result<Vec<Place>, SearchError> {
        let (tx, rx) = oneshot::channel();
        self.calls.lock().push((*region, category));
        self.pending.lock().push(PendingSearch {
            region: *region,
            category,
            respond: tx,
        });
        rx.await.unwrap_or_else(|_| {
            Err(SearchError::Unavailable {
                reason: "test dropped the call".to_string(),
            })
        })
    }
}

/// Poll `condition` until it holds or the timeout expires.
pub async fn eventually(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(TIMEOUT, async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not met in time");
}

/// Search provider for tests that must never search. Every call is
/// recorded and answered with an error.
#[derive(Default)]
pub struct FailingSearch {
    calls: Mutex<usize>,
}

impl FailingSearch {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock()
    }
}

#[async_trait]
impl SearchProvider for FailingSearch {
    async fn search(&self, _: &Region, _: Category) -> Result<Vec<Place>, SearchError> {
        *self.calls.lock() += 1;
        Err(SearchError::Unavailable {
            reason: "search is not expected here".to_string(),
        })
    }
}
