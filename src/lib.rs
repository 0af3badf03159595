//! Coordinates device location updates with a live map search.
//!
//! The core is [`map::MapReducer`]: a pure reducer that turns user taps,
//! location provider events and search responses into one [`map::AppState`]
//! plus a list of effects. [`store::Store`] runs it single-writer and
//! executes the effects, cancelling superseded work by tag.

pub mod config;
pub mod location;
pub mod logging;
pub mod map;
pub mod mvi;
pub mod search;
pub mod shutdown;
pub mod store;
