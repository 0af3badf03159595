//! Effects requested by the map reducer.
//!
//! Effects are returned from the reducer and executed by the store.
//! This keeps the reducer pure while making async operations explicit.

use std::fmt;

use super::state::{Category, Region};

/// Identifies one search request so late results can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SearchId(pub u64);

impl fmt::Display for SearchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "search#{}", self.0)
    }
}

/// Cancellation scopes. Starting an effect under a tag cancels the
/// previous effect running under the same tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancelId {
    /// Lives as long as the view is active.
    LocationSubscription,
    /// At most one live search.
    Search,
}

impl CancelId {
    pub fn as_str(&self) -> &'static str {
        match self {
            CancelId::LocationSubscription => "location-subscription",
            CancelId::Search => "search",
        }
    }
}

impl fmt::Display for CancelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapEffect {
    /// Pull location provider events until cancelled.
    SubscribeLocationEvents,
    /// Ask the user for location permission.
    RequestAuthorization,
    /// Ask for a one-shot location fix.
    RequestLocation,
    /// Search `region` for places of `category`.
    Search {
        id: SearchId,
        region: Region,
        category: Category,
    },
    /// Cancel whatever runs under the tag.
    Cancel(CancelId),
}

impl MapEffect {
    /// Tag this effect starts under, if it is cancellable.
    pub fn cancel_id(&self) -> Option<CancelId> {
        match self {
            MapEffect::SubscribeLocationEvents => Some(CancelId::LocationSubscription),
            MapEffect::Search { .. } => Some(CancelId::Search),
            MapEffect::RequestAuthorization
            | MapEffect::RequestLocation
            | MapEffect::Cancel(_) => None,
        }
    }
}
