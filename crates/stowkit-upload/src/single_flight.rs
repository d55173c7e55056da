//! In-flight upload coalescing
//!
//! When single-flight mode is enabled the gateway routes concurrent
//! uploads that share a cache key through this table: the first caller
//! becomes the leader and performs the storage put, later callers wait
//! for the leader's published result instead of putting again.

use std::collections::HashMap;

use tokio::sync::{watch, Mutex};

use crate::types::UploadReceipt;

/// Terminal state of a flight, fanned out to waiters. Errors travel as
/// strings because the underlying storage error is not `Clone`.
pub(crate) type FlightResult = Option<Result<UploadReceipt, String>>;

/// Outcome of joining the table
pub(crate) enum Flight {
    /// This call performs the upload and must publish via `complete`
    Leader(watch::Sender<FlightResult>),
    /// Another call is already uploading; wait on the channel
    Waiter(watch::Receiver<FlightResult>),
}

/// Table of in-flight uploads keyed by cache key
pub(crate) struct InflightTable {
    flights: Mutex<HashMap<String, watch::Receiver<FlightResult>>>,
}

impl InflightTable {
    pub(crate) fn new() -> Self {
        Self {
            flights: Mutex::new(HashMap::new()),
        }
    }

    /// Join the flight for `key`, becoming the leader if none is active.
    ///
    /// A flight whose leader was dropped without publishing (channel
    /// closed while the value is still `None`) is dead; the next joiner
    /// replaces it instead of waiting forever.
    pub(crate) async fn join(&self, key: &str) -> Flight {
        let mut flights = self.flights.lock().await;

        if let Some(rx) = flights.get(key) {
            let dead = rx.has_changed().is_err() && rx.borrow().is_none();
            if !dead {
                return Flight::Waiter(rx.clone());
            }
            flights.remove(key);
        }

        let (tx, rx) = watch::channel(None);
        flights.insert(key.to_string(), rx);
        Flight::Leader(tx)
    }

    /// Publish the leader's result and retire the flight.
    pub(crate) async fn complete(
        &self,
        key: &str,
        tx: watch::Sender<FlightResult>,
        result: Result<UploadReceipt, String>,
    ) {
        // Publish before removing so a joiner racing the removal still
        // observes a terminal value instead of an abandoned channel.
        let _ = tx.send(Some(result));
        self.flights.lock().await.remove(key);
    }
}
