//! In-process store of the current thermostat state, backed by a tokio
//! [`watch`] channel.
//!
//! The store never mutates a [`ThermostatState`] in place: every write
//! swaps in a whole new [`Snapshot`] under the channel's lock, so concurrent
//! writers are serialized and readers only ever see complete snapshots.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;

use thermostat_domain::thermostat::ThermostatState;

/// One published version of the thermostat state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Starts at 0 and increases by one with every write.
    pub revision: u64,
    pub taken_at: DateTime<Utc>,
    pub state: ThermostatState,
}

impl Snapshot {
    fn initial(state: ThermostatState) -> Self {
        Self {
            revision: 0,
            taken_at: Utc::now(),
            state,
        }
    }

    fn succeed(&mut self, state: ThermostatState) {
        self.revision += 1;
        self.taken_at = Utc::now();
        self.state = state;
    }
}

/// Single source of truth for "the current" thermostat state.
///
/// Cloning the store yields another handle to the same channel.
#[derive(Debug, Clone)]
pub struct ThermostatStore {
    sender: Arc<watch::Sender<Snapshot>>,
}

impl ThermostatStore {
    /// Create a store whose revision 0 is `initial`.
    #[must_use]
    pub fn new(initial: ThermostatState) -> Self {
        let (sender, _) = watch::channel(Snapshot::initial(initial));
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Copy of the latest snapshot.
    #[must_use]
    pub fn current(&self) -> Snapshot {
        self.sender.borrow().clone()
    }

    /// Subscribe to snapshot changes.
    ///
    /// The receiver starts out having seen the current snapshot and is
    /// notified of every later write.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.sender.subscribe()
    }

    /// Derive the next state from the current one and publish it.
    pub fn replace_with(&self, next: impl FnOnce(&ThermostatState) -> ThermostatState) -> Snapshot {
        let mut published = None;
        self.sender.send_modify(|snapshot| {
            let state = next(&snapshot.state);
            snapshot.succeed(state);
            published = Some(snapshot.clone());
        });
        published.unwrap_or_else(|| self.current())
    }

    /// Like [`replace_with`](Self::replace_with), but `next` may refuse.
    ///
    /// The check and the write happen under the same lock; when `next`
    /// returns an error nothing is published and subscribers are not woken.
    ///
    /// # Errors
    ///
    /// Returns whatever error `next` returned.
    pub fn try_replace_with<E>(
        &self,
        next: impl FnOnce(&ThermostatState) -> Result<ThermostatState, E>,
    ) -> Result<Snapshot, E> {
        let mut outcome = None;
        self.sender
            .send_if_modified(|snapshot| match next(&snapshot.state) {
                Ok(state) => {
                    snapshot.succeed(state);
                    outcome = Some(Ok(snapshot.clone()));
                    true
                }
                Err(err) => {
                    outcome = Some(Err(err));
                    false
                }
            });
        outcome.unwrap_or_else(|| Ok(self.current()))
    }
}
