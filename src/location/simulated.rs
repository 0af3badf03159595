//! In-process location provider.
//!
//! Stands in for the platform service in the demo binary and in tests.
//! Events are fanned out over a broadcast channel so every subscription
//! sees everything produced after it was opened.

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::map::Coordinate;

use super::{AuthorizationStatus, LocationError, LocationEvent, LocationEventStream, LocationProvider};

const EVENT_CAPACITY: usize = 64;

pub struct SimulatedLocationProvider {
    status: Mutex<AuthorizationStatus>,
    /// What the user answers when prompted for permission.
    prompt_answer: Mutex<AuthorizationStatus>,
    position: Mutex<Option<Coordinate>>,
    events: broadcast::Sender<LocationEvent>,
}

impl SimulatedLocationProvider {
    pub fn new(status: AuthorizationStatus, position: Option<Coordinate>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            status: Mutex::new(status),
            prompt_answer: Mutex::new(AuthorizationStatus::AuthorizedWhenInUse),
            position: Mutex::new(position),
            events,
        }
    }

    /// Answer given to the next permission prompt.
    pub fn with_prompt_answer(self, answer: AuthorizationStatus) -> Self {
        *self.prompt_answer.lock() = answer;
        self
    }

    pub fn set_position(&self, position: Option<Coordinate>) {
        *self.position.lock() = position;
    }

    /// Change the permission as if from system settings and notify subscribers.
    pub fn set_authorization(&self, status: AuthorizationStatus) {
        *self.status.lock() = status;
        self.emit(LocationEvent::AuthorizationChanged(status));
    }

    /// Push an arbitrary event to current subscribers.
    pub fn emit(&self, event: LocationEvent) {
        if self.events.send(event).is_err() {
            tracing::trace!("Location event dropped (no subscribers)");
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.events.receiver_count()
    }
}

#[async_trait]
impl LocationProvider for SimulatedLocationProvider {
    fn authorization_status(&self) -> AuthorizationStatus {
        *self.status.lock()
    }

    async fn request_authorization(&self) -> Result<(), LocationError> {
        let current = self.authorization_status();
        if current != AuthorizationStatus::NotDetermined {
            // Platforms only prompt once; report the standing answer.
            self.emit(LocationEvent::AuthorizationChanged(current));
            return Ok(());
        }
        let answer = *self.prompt_answer.lock();
        tracing::debug!(%answer, "Simulated permission prompt answered");
        self.set_authorization(answer);
        Ok(())
    }

    async fn request_location(&self) -> Result<(), LocationError> {
        let status = self.authorization_status();
        if !status.is_authorized() {
            return Err(LocationError::NotAuthorized { status });
        }
        let position = *self.position.lock();
        match position {
            Some(fix) => {
                self.emit(LocationEvent::LocationsUpdated(vec![fix]));
                Ok(())
            }
            None => {
                self.emit(LocationEvent::Failed("no position available".to_string()));
                Err(LocationError::Unavailable {
                    reason: "no position available".to_string(),
                })
            }
        }
    }

    fn events(&self) -> LocationEventStream {
        let stream = BroadcastStream::new(self.events.subscribe()).filter_map(|item| match item {
            Ok(event) => Some(event),
            Err(err) => {
                tracing::warn!(error = %err, "Location subscriber lagged behind");
                None
            }
        });
        Box::pin(stream)
    }
}
