//! Reducer for the map search view.

use std::sync::Arc;

use crate::location::{AuthorizationStatus, LocationEvent, LocationProvider};
use crate::mvi::Reducer;

use super::effect::{CancelId, MapEffect, SearchId};
use super::intent::MapIntent;
use super::state::{AlertKind, AppState, Category, Region, Span};

/// Reducer for map search state transitions.
///
/// Pure apart from one synchronous read: the current authorization
/// status of the location provider it was built with.
pub struct MapReducer {
    location: Arc<dyn LocationProvider>,
    fix_span: Span,
}

impl MapReducer {
    pub fn new(location: Arc<dyn LocationProvider>) -> Self {
        Self {
            location,
            fix_span: Span::default(),
        }
    }

    /// Span of the viewport built around a location fix.
    pub fn with_fix_span(mut self, span: Span) -> Self {
        self.fix_span = span;
        self
    }

    fn on_category_selected(
        &self,
        mut state: AppState,
        category: Category,
    ) -> (AppState, Vec<MapEffect>) {
        if state.category == Some(category) {
            state.category = None;
            state.points_of_interest.clear();
            state.in_flight_search = None;
            return (state, vec![MapEffect::Cancel(CancelId::Search)]);
        }

        state.category = Some(category);
        match state.region {
            Some(region) => {
                let effect = start_search(&mut state, region, category);
                (state, vec![effect])
            }
            // Deferred until a region arrives.
            None => (state, Vec::new()),
        }
    }

    fn on_region_changed(&self, mut state: AppState, region: Region) -> (AppState, Vec<MapEffect>) {
        state.region = Some(region);
        match state.category {
            Some(category) => {
                let effect = start_search(&mut state, region, category);
                (state, vec![effect])
            }
            None => (state, Vec::new()),
        }
    }

    fn on_current_location_requested(&self, mut state: AppState) -> (AppState, Vec<MapEffect>) {
        match self.location.authorization_status() {
            AuthorizationStatus::NotDetermined => {
                state.is_requesting_current_location = true;
                (state, vec![MapEffect::RequestAuthorization])
            }
            AuthorizationStatus::Restricted => {
                state.alert = Some(AlertKind::AuthorizationRestricted.into());
                (state, Vec::new())
            }
            AuthorizationStatus::Denied => {
                state.alert = Some(AlertKind::AuthorizationDenied.into());
                (state, Vec::new())
            }
            AuthorizationStatus::AuthorizedAlways | AuthorizationStatus::AuthorizedWhenInUse => {
                (state, vec![MapEffect::RequestLocation])
            }
        }
    }

    fn on_location_event(
        &self,
        mut state: AppState,
        event: LocationEvent,
    ) -> (AppState, Vec<MapEffect>) {
        match event {
            LocationEvent::AuthorizationChanged(status)
                if status.is_authorized() && state.is_requesting_current_location =>
            {
                (state, vec![MapEffect::RequestLocation])
            }
            LocationEvent::AuthorizationChanged(AuthorizationStatus::Denied)
                if state.is_requesting_current_location =>
            {
                state.alert = Some(AlertKind::LocationDeclined.into());
                state.is_requesting_current_location = false;
                (state, Vec::new())
            }
            LocationEvent::LocationsUpdated(locations) => {
                // The request is over even when it produced no fix.
                state.is_requesting_current_location = false;
                if let Some(fix) = locations.first() {
                    // No search here: the host reports the new viewport
                    // back through RegionChanged.
                    state.region = Some(Region::new(*fix, self.fix_span));
                }
                (state, Vec::new())
            }
            other => {
                tracing::trace!(event = ?other, "Ignoring location provider event");
                (state, Vec::new())
            }
        }
    }
}

impl Reducer for MapReducer {
    type State = AppState;
    type Intent = MapIntent;
    type Effect = MapEffect;

    fn reduce(&self, mut state: Self::State, intent: Self::Intent) -> (Self::State, Vec<MapEffect>) {
        match intent {
            MapIntent::ViewBecameActive => (state, vec![MapEffect::SubscribeLocationEvents]),

            MapIntent::ViewBecameInactive => (
                state,
                vec![MapEffect::Cancel(CancelId::LocationSubscription)],
            ),

            MapIntent::CategorySelected(category) => self.on_category_selected(state, category),

            MapIntent::RegionChanged(region) => self.on_region_changed(state, region),

            MapIntent::CurrentLocationRequested => self.on_current_location_requested(state),

            MapIntent::AlertDismissed => {
                state.alert = None;
                (state, Vec::new())
            }

            MapIntent::LocationProviderEvent(event) => self.on_location_event(state, event),

            MapIntent::SearchCompleted { id, result } => {
                if state.in_flight_search != Some(id) {
                    tracing::debug!(%id, "Dropping result of cancelled search");
                    return (state, Vec::new());
                }
                state.in_flight_search = None;
                match result {
                    Ok(places) => {
                        state.points_of_interest = places.into_iter().map(Into::into).collect();
                    }
                    // Previous results stay on the map.
                    Err(_) => state.alert = Some(AlertKind::SearchFailed.into()),
                }
                (state, Vec::new())
            }
        }
    }
}

/// Hand out the next search id and mark it as the only live search.
fn start_search(state: &mut AppState, region: Region, category: Category) -> MapEffect {
    state.next_search_id += 1;
    let id = SearchId(state.next_search_id);
    state.in_flight_search = Some(id);
    MapEffect::Search {
        id,
        region,
        category,
    }
}
