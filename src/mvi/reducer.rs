//! Reducer trait for MVI architecture.

use super::intent::Intent;
use super::state::UiState;

/// Reducer transforms state based on intents.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Intent) -> (State, Effects).
/// Any I/O is described by the returned effects and performed by
/// whoever drives the reducer.
///
/// Reducers are values so that the capabilities they read from
/// (e.g. a provider's synchronous status query) are handed to them
/// at construction time instead of being looked up globally.
pub trait Reducer: Send + Sync + 'static {
    /// The state type this reducer operates on.
    type State: UiState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// Descriptions of async work requested by a transition.
    type Effect: Send + 'static;

    /// Process an intent and return the new state plus follow-up effects.
    ///
    /// This must not perform side effects itself.
    fn reduce(
        &self,
        state: Self::State,
        intent: Self::Intent,
    ) -> (Self::State, Vec<Self::Effect>);
}
