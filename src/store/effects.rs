//! Executes map effects as tokio tasks.
//!
//! Tagged effects are tracked in a scope table. Starting an effect under
//! a tag cancels the token of the previous one first, so at most one task
//! per tag is ever allowed to report back.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;

use crate::location::{LocationError, LocationEvent, LocationProvider};
use crate::map::{CancelId, Category, MapEffect, MapIntent, Region, SearchFailed, SearchId};
use crate::search::SearchProvider;

pub(crate) struct EffectRunner {
    location: Arc<dyn LocationProvider>,
    search: Arc<dyn SearchProvider>,
    intents: mpsc::UnboundedSender<MapIntent>,
    scopes: HashMap<CancelId, CancellationToken>,
}

impl EffectRunner {
    pub(crate) fn new(
        location: Arc<dyn LocationProvider>,
        search: Arc<dyn SearchProvider>,
        intents: mpsc::UnboundedSender<MapIntent>,
    ) -> Self {
        Self {
            location,
            search,
            intents,
            scopes: HashMap::new(),
        }
    }

    pub(crate) fn run(&mut self, effect: MapEffect) {
        tracing::trace!(?effect, "Running effect");
        match effect {
            MapEffect::SubscribeLocationEvents => self.subscribe_location_events(),
            MapEffect::RequestAuthorization => self.request_authorization(),
            MapEffect::RequestLocation => self.request_location(),
            MapEffect::Search {
                id,
                region,
                category,
            } => self.search(id, region, category),
            MapEffect::Cancel(scope) => self.cancel(scope),
        }
    }

    /// Number of scopes with a live token.
    pub(crate) fn active_scopes(&self) -> usize {
        self.scopes.values().filter(|t| !t.is_cancelled()).count()
    }

    pub(crate) fn cancel_all(&mut self) {
        for (scope, token) in self.scopes.drain() {
            token.cancel();
            tracing::debug!(%scope, "Cancelled effect on teardown");
        }
    }

    fn cancel(&mut self, scope: CancelId) {
        match self.scopes.remove(&scope) {
            Some(token) => {
                token.cancel();
                tracing::debug!(%scope, "Cancelled effect");
            }
            None => tracing::trace!(%scope, "Nothing to cancel"),
        }
    }

    /// Register a fresh token for `scope`, cancelling the one it replaces.
    fn begin(&mut self, scope: CancelId) -> CancellationToken {
        let token = CancellationToken::new();
        if let Some(previous) = self.scopes.insert(scope, token.clone()) {
            if !previous.is_cancelled() {
                previous.cancel();
                tracing::debug!(%scope, "Preempted in-flight effect");
            }
        }
        token
    }

    fn subscribe_location_events(&mut self) {
        // Open the stream before spawning so nothing emitted by a request
        // dispatched right after this is missed.
        let mut events = self.location.events();
        let token = self.begin(CancelId::LocationSubscription);
        let intents = self.intents.clone();

        tokio::spawn(async move {
            tracing::debug!("Location subscription started");
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    next = events.next() => match next {
                        Some(event) => {
                            if intents.send(MapIntent::LocationProviderEvent(event)).is_err() {
                                break;
                            }
                        }
                        None => break,
                    },
                }
            }
            tracing::debug!("Location subscription ended");
        });
    }

    fn request_authorization(&self) {
        let location = Arc::clone(&self.location);
        let intents = self.intents.clone();
        tokio::spawn(async move {
            if let Err(err) = location.request_authorization().await {
                report_location_error(&intents, err);
            }
        });
    }

    fn request_location(&self) {
        let location = Arc::clone(&self.location);
        let intents = self.intents.clone();
        tokio::spawn(async move {
            if let Err(err) = location.request_location().await {
                report_location_error(&intents, err);
            }
        });
    }

    fn search(&mut self, id: SearchId, region: Region, category: Category) {
        let token = self.begin(CancelId::Search);
        let search = Arc::clone(&self.search);
        let intents = self.intents.clone();

        tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!(%id, "Search cancelled before completion");
                    return;
                }
                outcome = search.search(&region, category) => outcome,
            };

            if token.is_cancelled() {
                tracing::debug!(%id, "Discarding result of cancelled search");
                return;
            }

            let result = outcome.map_err(|err| {
                tracing::warn!(%id, %category, error = %err, "Search failed");
                SearchFailed
            });
            if intents.send(MapIntent::SearchCompleted { id, result }).is_err() {
                tracing::trace!(%id, "Search result dropped (store gone)");
            }
        });
    }
}

/// Refusals surface as an authorization change. A request the provider
/// could not serve is reported as a fix with no locations, which ends it.
fn report_location_error(intents: &mpsc::UnboundedSender<MapIntent>, err: LocationError) {
    let event = match err {
        LocationError::NotAuthorized { status } if status.is_refused() => {
            tracing::info!(%status, "Location request refused");
            LocationEvent::AuthorizationChanged(status)
        }
        LocationError::Unavailable { reason } => {
            tracing::warn!(%reason, "Location unavailable");
            LocationEvent::LocationsUpdated(Vec::new())
        }
        other => {
            tracing::warn!(error = %other, "Location request failed");
            return;
        }
    };
    if intents.send(MapIntent::LocationProviderEvent(event)).is_err() {
        tracing::trace!("Location error dropped (store gone)");
    }
}
