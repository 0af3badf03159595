//! Base trait for intents (user/system actions) in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (category taps, "locate me" button)
/// - Map events (viewport changes)
/// - Provider results (location fixes, search responses)
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}
