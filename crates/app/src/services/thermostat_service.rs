//! Thermostat service — use-cases that move the thermostat from one
//! snapshot to the next.

use std::time::Duration;

use tokio::sync::watch;

use thermostat_domain::fetch_status::FailureReason;
use thermostat_domain::run_state::RunState;
use thermostat_domain::temperature::{Reading, Setpoint};

use crate::error::{ThermostatError, TransitionError};
use crate::fetch_lifecycle::{FetchEvent, advance};
use crate::ports::{OutsideTemperatureSource, SourceError};
use crate::snapshot_store::{Snapshot, ThermostatStore};

/// How long [`ThermostatService::refresh_outside_temperature`] waits for the
/// source unless told otherwise.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Application service owning the write side of a [`ThermostatStore`].
pub struct ThermostatService<S> {
    store: ThermostatStore,
    source: S,
    fetch_timeout: Duration,
}

impl<S: OutsideTemperatureSource> ThermostatService<S> {
    /// Create a new service publishing to `store` and reading the outside
    /// temperature from `source`.
    pub fn new(store: ThermostatStore, source: S) -> Self {
        Self {
            store,
            source,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Bound every outside-temperature request by `timeout`.
    #[must_use]
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.store.current()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.store.subscribe()
    }

    /// Switch to `run_state`.
    #[tracing::instrument(skip(self), fields(mode = run_state.label()))]
    pub fn set_run_state(&self, run_state: RunState) -> Snapshot {
        let snapshot = self
            .store
            .replace_with(|state| state.clone().with_run_state(run_state));
        tracing::debug!(revision = snapshot.revision, "run state changed");
        snapshot
    }

    pub fn turn_off(&self) -> Snapshot {
        self.set_run_state(RunState::Off)
    }

    pub fn heat_to(&self, target: Setpoint) -> Snapshot {
        self.set_run_state(RunState::heating(target))
    }

    pub fn cool_to(&self, target: Setpoint) -> Snapshot {
        self.set_run_state(RunState::cooling(target))
    }

    /// Record a new measurement from the inside sensor.
    #[tracing::instrument(skip(self, reading), fields(reading = %reading))]
    pub fn record_inside_reading(&self, reading: Reading) -> Snapshot {
        self.store
            .replace_with(|state| state.clone().with_inside_temp(reading))
    }

    /// Fetch the outside temperature and publish the outcome.
    ///
    /// Publishes `InProgress` first, then either `Fetched` or `Failed`. A
    /// source error or timeout is not an error of this call: it ends up as
    /// the `Failed` reason in the returned snapshot. If the returned future
    /// is dropped before the source answers, `Failed` is published with
    /// [`CANCELLED_REASON`].
    ///
    /// # Errors
    ///
    /// Returns [`ThermostatError::Transition`] when a fetch is already in
    /// flight; the in-flight fetch is left untouched.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_outside_temperature(&self) -> Result<Snapshot, ThermostatError> {
        publish(&self.store, FetchEvent::Requested)?;
        let pending = PendingFetch::new(&self.store);

        let outcome = match tokio::time::timeout(self.fetch_timeout, self.source.fetch()).await {
            Ok(outcome) => outcome,
            Err(_) => Err(SourceError::Timeout {
                after: self.fetch_timeout,
            }),
        };

        let event = match outcome {
            Ok(reading) => {
                tracing::debug!(%reading, "outside temperature fetched");
                FetchEvent::Succeeded(reading)
            }
            Err(err) => {
                tracing::warn!(%err, "outside temperature fetch failed");
                // An unusable reason leaves `pending` armed, which publishes
                // the cancellation reason instead.
                FetchEvent::Failed(FailureReason::new(err.to_string())?)
            }
        };

        Ok(pending.settle(event)?)
    }
}

/// Reason published when a refresh ends without an outcome of its own.
pub const CANCELLED_REASON: &str = "outside temperature request cancelled";

/// Owns the `InProgress` phase of one refresh.
///
/// Dropped without [`PendingFetch::settle`], it publishes `Failed` so the
/// store never stays `InProgress` once nobody is waiting on the source.
struct PendingFetch<'a> {
    store: &'a ThermostatStore,
    settled: bool,
}

impl<'a> PendingFetch<'a> {
    fn new(store: &'a ThermostatStore) -> Self {
        Self {
            store,
            settled: false,
        }
    }

    fn settle(mut self, event: FetchEvent) -> Result<Snapshot, TransitionError> {
        self.settled = true;
        publish(self.store, event)
    }
}

impl Drop for PendingFetch<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let result = FailureReason::new(CANCELLED_REASON)
            .map_err(ThermostatError::from)
            .and_then(|reason| {
                publish(self.store, FetchEvent::Failed(reason)).map_err(ThermostatError::from)
            });
        match result {
            Ok(snapshot) => tracing::warn!(
                revision = snapshot.revision,
                "outside temperature request cancelled"
            ),
            Err(err) => tracing::error!(%err, "could not close cancelled fetch"),
        }
    }
}

fn publish(store: &ThermostatStore, event: FetchEvent) -> Result<Snapshot, TransitionError> {
    let label = event.label();
    let snapshot = store.try_replace_with(|state| -> Result<_, TransitionError> {
        let outside = advance(&state.outside_temp, event)?;
        Ok(state.clone().with_outside_temp(outside))
    })?;
    tracing::debug!(
        event = label,
        phase = snapshot.state.outside_temp.label(),
        revision = snapshot.revision,
        "fetch status advanced"
    );
    Ok(snapshot)
}
