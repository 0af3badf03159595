//! State for the map search view.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mvi::UiState;
use crate::search::Place;

use super::effect::SearchId;

/// Span applied to the viewport built around a fresh location fix.
pub const DEFAULT_FIX_SPAN_DEGREES: f64 = 0.05;

/// A point on the globe in floating point degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Range sanity check: latitude in [-90, 90], longitude in [-180, 180].
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Latitude/longitude deltas of a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Span {
    pub fn new(latitude_delta: f64, longitude_delta: f64) -> Self {
        Self {
            latitude_delta,
            longitude_delta,
        }
    }

    /// Same delta on both axes.
    pub fn square(degrees: f64) -> Self {
        Self::new(degrees, degrees)
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::square(DEFAULT_FIX_SPAN_DEGREES)
    }
}

/// A map viewport: center plus span.
///
/// Used both for display and as the geographic scope of a search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub center: Coordinate,
    pub span: Span,
}

impl Region {
    pub fn new(center: Coordinate, span: Span) -> Self {
        Self { center, span }
    }

    /// Whether `coordinate` falls inside the viewport bounds (edges included).
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        let half_lat = self.span.latitude_delta / 2.0;
        let half_lon = self.span.longitude_delta / 2.0;
        (coordinate.latitude - self.center.latitude).abs() <= half_lat
            && (coordinate.longitude - self.center.longitude).abs() <= half_lon
    }
}

/// A search result pinned on the map.
///
/// Equality is structural; two results with identical fields are the same.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub coordinate: Coordinate,
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

impl From<Place> for PointOfInterest {
    fn from(place: Place) -> Self {
        Self {
            coordinate: place.coordinate,
            title: place.name,
            subtitle: place.address,
        }
    }
}

/// Category filter for the place search. At most one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cafe,
    Museum,
    Nightlife,
    Park,
    Restaurant,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Cafe,
        Category::Museum,
        Category::Nightlife,
        Category::Park,
        Category::Restaurant,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cafe => "cafe",
            Category::Museum => "museum",
            Category::Nightlife => "nightlife",
            Category::Park => "park",
            Category::Restaurant => "restaurant",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown category '{0}' (expected one of: cafe, museum, nightlife, park, restaurant)")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// What went wrong, from the user's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// "Current location" tapped while access is restricted.
    AuthorizationRestricted,
    /// "Current location" tapped after access was denied.
    AuthorizationDenied,
    /// User declined the permission prompt.
    LocationDeclined,
    SearchFailed,
}

impl AlertKind {
    /// Fixed user-facing text for this kind.
    pub fn message(&self) -> &'static str {
        match self {
            AlertKind::AuthorizationRestricted => {
                "Location services are restricted. Please check your device settings."
            }
            AlertKind::AuthorizationDenied => {
                "Location access denied. Please enable location services in Settings."
            }
            AlertKind::LocationDeclined => {
                "Location makes this app better. Please consider giving us access."
            }
            AlertKind::SearchFailed => "Could not perform search. Please try again.",
        }
    }
}

/// A single dismissible alert.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertMessage {
    pub kind: AlertKind,
    pub text: String,
}

impl From<AlertKind> for AlertMessage {
    fn from(kind: AlertKind) -> Self {
        Self {
            kind,
            text: kind.message().to_string(),
        }
    }
}

/// Full view model of the map search screen.
///
/// Invariant: `category == None` implies `points_of_interest` is empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    /// Current viewport. `None` until the map or a location fix sets one.
    pub region: Option<Region>,
    pub category: Option<Category>,
    /// Results for `category` within `region`, in provider order.
    pub points_of_interest: Vec<PointOfInterest>,
    pub is_requesting_current_location: bool,
    pub alert: Option<AlertMessage>,
    /// Id of the one search whose result may still be applied.
    pub in_flight_search: Option<SearchId>,
    /// Next id handed out to a search effect.
    pub next_search_id: u64,
}

impl UiState for AppState {}

impl AppState {
    /// Whether a search result is still expected.
    pub fn is_searching(&self) -> bool {
        self.in_flight_search.is_some()
    }
}
