//! Map search feature module.
//!
//! Reconciles user taps, location provider events and search responses
//! into one view model.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - View model and domain values
//! - `intent.rs` - User/provider events
//! - `effect.rs` - Async work requested by transitions
//! - `reducer.rs` - State transitions

mod effect;
mod intent;
mod reducer;
mod state;

pub use effect::{CancelId, MapEffect, SearchId};
pub use intent::{MapIntent, SearchFailed};
pub use reducer::MapReducer;
pub use state::{
    AlertKind, AlertMessage, AppState, Category, Coordinate, PointOfInterest, Region, Span,
    UnknownCategory, DEFAULT_FIX_SPAN_DEGREES,
};
