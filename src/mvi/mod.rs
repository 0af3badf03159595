//! Model-View-Intent (MVI) architecture primitives.
//!
//! This module provides base traits for implementing unidirectional
//! data flow between the host (map view, providers) and the core.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑          │
//!    │          └──→ Effects ──→ Store (runs them)
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: Immutable representation of view state
//! - **Intent**: User actions or provider events
//! - **Reducer**: Pure function that transforms state based on intents
//!   and describes the async work to run next as effects

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
