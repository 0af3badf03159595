use serde::{Deserialize, Serialize};

use crate::location::AuthorizationStatus;
use crate::map::{Category, Coordinate, Span, DEFAULT_FIX_SPAN_DEGREES};
use crate::search::Place;

/// Root configuration container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub demo: DemoConfig,
    /// Places known to the catalog search provider.
    #[serde(default = "default_places")]
    pub places: Vec<PlaceEntry>,
}

/// Map behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Span in degrees of the viewport built around a location fix (default: 0.05).
    #[serde(default = "default_fix_span_degrees")]
    pub fix_span_degrees: f64,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence (default: "info").
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Settings of the simulated providers used by the demo session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Location permission at startup (default: "when_in_use").
    #[serde(default = "default_authorization")]
    pub authorization: AuthorizationStatus,
    /// Simulated device position.
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    /// Category selected once the map has a region (default: "cafe").
    #[serde(default = "default_category")]
    pub category: Category,
    /// Artificial delay of each search in milliseconds (default: 150).
    #[serde(default = "default_search_latency_ms")]
    pub search_latency_ms: u64,
}

/// One catalog place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceEntry {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    pub category: Category,
    pub latitude: f64,
    pub longitude: f64,
}

impl PlaceEntry {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    pub fn to_place(&self) -> Place {
        Place {
            name: Some(self.name.clone()),
            address: self.address.clone(),
            coordinate: self.coordinate(),
        }
    }
}

impl Config {
    pub fn fix_span(&self) -> Span {
        Span::square(self.map.fix_span_degrees)
    }
}

impl DemoConfig {
    pub fn position(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

fn default_fix_span_degrees() -> f64 {
    DEFAULT_FIX_SPAN_DEGREES
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_authorization() -> AuthorizationStatus {
    AuthorizationStatus::AuthorizedWhenInUse
}

fn default_latitude() -> f64 {
    40.65
}

fn default_longitude() -> f64 {
    -73.95
}

fn default_category() -> Category {
    Category::Cafe
}

fn default_search_latency_ms() -> u64 {
    150
}

fn place(
    name: &str,
    address: &str,
    category: Category,
    latitude: f64,
    longitude: f64,
) -> PlaceEntry {
    PlaceEntry {
        name: name.to_string(),
        address: Some(address.to_string()),
        category,
        latitude,
        longitude,
    }
}

fn default_places() -> Vec<PlaceEntry> {
    vec![
        place("Joe's Cafe", "123 Main St", Category::Cafe, 40.651, -73.949),
        place("Flatbush Roasters", "780 Flatbush Ave", Category::Cafe, 40.655, -73.959),
        place("Brooklyn Museum", "200 Eastern Pkwy", Category::Museum, 40.671, -73.964),
        place("Prospect Park", "Prospect Park West", Category::Park, 40.660, -73.969),
        place("The Late Room", "45 Church Ave", Category::Nightlife, 40.647, -73.955),
        place("Corner Table", "312 Cortelyou Rd", Category::Restaurant, 40.640, -73.963),
    ]
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            fix_span_degrees: default_fix_span_degrees(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            authorization: default_authorization(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            category: default_category(),
            search_latency_ms: default_search_latency_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            logging: LoggingConfig::default(),
            demo: DemoConfig::default(),
            places: default_places(),
        }
    }
}
