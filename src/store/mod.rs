//! Single-writer store driving the map reducer.
//!
//! All intents go through one channel and are reduced one at a time on
//! the store task. Effects run concurrently on their own tasks and feed
//! their results back as intents on the same channel.

mod effects;

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::location::LocationProvider;
use crate::map::{AppState, MapIntent, MapReducer};
use crate::mvi::Reducer;
use crate::search::SearchProvider;
use crate::shutdown::ShutdownHandle;

use effects::EffectRunner;

/// Errors returned by a [`StoreHandle`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The store loop has stopped and accepts no more intents.
    #[error("store is closed")]
    Closed,
}

/// Owns the reducer and provider handles until started.
pub struct Store {
    reducer: MapReducer,
    location: Arc<dyn LocationProvider>,
    search: Arc<dyn SearchProvider>,
}

impl Store {
    pub fn new(
        reducer: MapReducer,
        location: Arc<dyn LocationProvider>,
        search: Arc<dyn SearchProvider>,
    ) -> Self {
        Self {
            reducer,
            location,
            search,
        }
    }

    /// Spawn the store loop on the current tokio runtime.
    pub fn start(self, initial: AppState) -> StoreHandle {
        let (intents_tx, intents_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(initial.clone());
        let shutdown = ShutdownHandle::new();
        let runner = EffectRunner::new(self.location, self.search, intents_tx.clone());

        let task = tokio::spawn(run_loop(
            self.reducer,
            initial,
            intents_rx,
            state_tx,
            runner,
            shutdown.clone(),
        ));

        StoreHandle {
            intents: intents_tx,
            state: state_rx,
            shutdown,
            task,
        }
    }
}

/// Host-side handle to a running store.
pub struct StoreHandle {
    intents: mpsc::UnboundedSender<MapIntent>,
    state: watch::Receiver<AppState>,
    shutdown: ShutdownHandle,
    task: JoinHandle<()>,
}

impl StoreHandle {
    /// Queue an intent for reduction.
    pub fn send(&self, intent: MapIntent) -> Result<(), StoreError> {
        if self.shutdown.is_shutting_down() {
            return Err(StoreError::Closed);
        }
        self.intents.send(intent).map_err(|_| StoreError::Closed)
    }

    /// Latest reduced state.
    pub fn state(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Receiver notified whenever the state changes.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.clone()
    }

    /// Wait until the state satisfies `predicate` (checked immediately too).
    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&AppState) -> bool,
    ) -> Result<AppState, StoreError> {
        let mut state = self.state.clone();
        let snapshot = state
            .wait_for(predicate)
            .await
            .map_err(|_| StoreError::Closed)?
            .clone();
        Ok(snapshot)
    }

    /// Handle that stops the store when signaled.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Tear the store down: cancel outstanding effects and stop the loop.
    pub async fn shutdown(self) {
        self.shutdown.signal();
        if let Err(err) = self.task.await {
            tracing::warn!(error = %err, "Store task ended abnormally");
        }
    }
}

async fn run_loop(
    reducer: MapReducer,
    mut state: AppState,
    mut intents: mpsc::UnboundedReceiver<MapIntent>,
    state_tx: watch::Sender<AppState>,
    mut runner: EffectRunner,
    shutdown: ShutdownHandle,
) {
    tracing::debug!("Store started");

    loop {
        let intent = tokio::select! {
            biased;
            _ = shutdown.wait() => break,
            next = intents.recv() => match next {
                Some(intent) => intent,
                None => break,
            },
        };

        let name = intent.name();
        let (next, effects) = reducer.reduce(state, intent);
        state = next;

        tracing::debug!(
            intent = name,
            effects = effects.len(),
            category = ?state.category,
            points = state.points_of_interest.len(),
            requesting_location = state.is_requesting_current_location,
            "Reduced intent"
        );

        state_tx.send_if_modified(|current| {
            if *current == state {
                return false;
            }
            *current = state.clone();
            true
        });

        for effect in effects {
            runner.run(effect);
        }
        tracing::trace!(active_scopes = runner.active_scopes(), "Effects dispatched");
    }

    runner.cancel_all();
    tracing::debug!("Store stopped");
}
