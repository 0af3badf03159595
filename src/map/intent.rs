//! Intents for the map search view.

use thiserror::Error;

use crate::location::LocationEvent;
use crate::mvi::Intent;
use crate::search::Place;

use super::effect::SearchId;
use super::state::{Category, Region};

/// A search ended without results. Provider detail is dropped before
/// this reaches the reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("search failed")]
pub struct SearchFailed;

/// Everything the map reducer reacts to, one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum MapIntent {
    /// The map view appeared.
    ViewBecameActive,

    /// The map view went away.
    ViewBecameInactive,

    /// User tapped a category. Tapping the active one clears it.
    CategorySelected(Category),

    /// The viewport moved.
    RegionChanged(Region),

    /// User tapped "current location".
    CurrentLocationRequested,

    /// User dismissed the alert.
    AlertDismissed,

    /// Delivered through the location subscription.
    LocationProviderEvent(LocationEvent),

    /// A search effect finished.
    SearchCompleted {
        id: SearchId,
        result: Result<Vec<Place>, SearchFailed>,
    },
}

impl Intent for MapIntent {}

impl MapIntent {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            MapIntent::ViewBecameActive => "view_became_active",
            MapIntent::ViewBecameInactive => "view_became_inactive",
            MapIntent::CategorySelected(_) => "category_selected",
            MapIntent::RegionChanged(_) => "region_changed",
            MapIntent::CurrentLocationRequested => "current_location_requested",
            MapIntent::AlertDismissed => "alert_dismissed",
            MapIntent::LocationProviderEvent(_) => "location_provider_event",
            MapIntent::SearchCompleted { .. } => "search_completed",
        }
    }
}
