//! Location provider boundary.
//!
//! The core only needs three things from the platform location service:
//! a synchronous authorization query, fire-and-forget requests whose
//! outcome arrives later, and a stream of provider events.

mod simulated;

use std::fmt;
use std::pin::Pin;
use std::str::FromStr;

use async_trait::async_trait;
use futures_core::Stream;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::map::Coordinate;

pub use simulated::SimulatedLocationProvider;

/// Location permission as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
    NotDetermined,
    Restricted,
    Denied,
    AuthorizedAlways,
    AuthorizedWhenInUse,
}

impl AuthorizationStatus {
    pub fn is_authorized(&self) -> bool {
        matches!(
            self,
            AuthorizationStatus::AuthorizedAlways | AuthorizationStatus::AuthorizedWhenInUse
        )
    }

    /// Denied by the user or restricted by policy.
    pub fn is_refused(&self) -> bool {
        matches!(
            self,
            AuthorizationStatus::Denied | AuthorizationStatus::Restricted
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorizationStatus::NotDetermined => "not_determined",
            AuthorizationStatus::Restricted => "restricted",
            AuthorizationStatus::Denied => "denied",
            AuthorizationStatus::AuthorizedAlways => "always",
            AuthorizationStatus::AuthorizedWhenInUse => "when_in_use",
        }
    }
}

impl fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown authorization status '{0}'")]
pub struct UnknownAuthorizationStatus(pub String);

impl FromStr for AuthorizationStatus {
    type Err = UnknownAuthorizationStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "not_determined" | "undetermined" => Ok(AuthorizationStatus::NotDetermined),
            "restricted" => Ok(AuthorizationStatus::Restricted),
            "denied" => Ok(AuthorizationStatus::Denied),
            "always" | "authorized_always" => Ok(AuthorizationStatus::AuthorizedAlways),
            "when_in_use" | "authorized_when_in_use" => {
                Ok(AuthorizationStatus::AuthorizedWhenInUse)
            }
            _ => Err(UnknownAuthorizationStatus(s.to_string())),
        }
    }
}

/// Pushed by the provider while a subscription is live.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationEvent {
    AuthorizationChanged(AuthorizationStatus),
    LocationsUpdated(Vec<Coordinate>),
    /// The platform reported an error. Carries its description only.
    Failed(String),
}

/// Errors returned when a request cannot even be started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("location access not authorized ({status})")]
    NotAuthorized { status: AuthorizationStatus },

    #[error("location service unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Events from a provider, pulled until the consumer drops it.
pub type LocationEventStream = Pin<Box<dyn Stream<Item = LocationEvent> + Send>>;

/// Capability contract of a platform location service.
///
/// Results of `request_authorization` and `request_location` are not
/// returned directly: they arrive later on the stream from `events`.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Current permission, answered synchronously.
    fn authorization_status(&self) -> AuthorizationStatus;

    /// Prompt for permission. The answer arrives as
    /// `LocationEvent::AuthorizationChanged`.
    async fn request_authorization(&self) -> Result<(), LocationError>;

    /// Request a one-shot fix. Zero or more coordinates arrive as
    /// `LocationEvent::LocationsUpdated`.
    async fn request_location(&self) -> Result<(), LocationError>;

    /// Open a new subscription. Events produced before this call are
    /// not replayed.
    fn events(&self) -> LocationEventStream;
}
