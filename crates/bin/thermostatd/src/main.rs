//! # thermostatd — thermostat daemon
//!
//! Composition root that wires the virtual outside sensor into the
//! thermostat service and keeps the outside temperature fresh.
//!
//! ## Responsibilities
//! - Parse configuration (env vars, config file)
//! - Initialize logging
//! - Construct the snapshot store with the configured initial state
//! - Construct the outside sensor adapter and the thermostat service
//! - Log every published snapshot
//! - Refresh the outside temperature on a fixed interval until Ctrl-C
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::time::Duration;

use thermostat_adapter_virtual::VirtualOutsideSensor;
use thermostat_app::services::thermostat_service::ThermostatService;
use thermostat_app::snapshot_store::{Snapshot, ThermostatStore};
use thermostat_domain::fetch_status::FetchStatus;
use thermostat_domain::temperature::Scale;
use tokio::sync::watch;
use tokio::time::{Interval, MissedTickBehavior};
use tracing_subscriber::EnvFilter;

use config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Store
    let store = ThermostatStore::new(config.initial_state());

    // Outside sensor
    let mut sensor = VirtualOutsideSensor::new(config.outside.sensor.clone());
    if let Some(latency) = config.sensor_latency() {
        sensor = sensor.with_latency(latency);
    }

    // Service
    let service =
        ThermostatService::new(store.clone(), sensor).with_fetch_timeout(config.fetch_timeout());

    let watcher = tokio::spawn(log_snapshots(
        store.subscribe(),
        config.display.preferred_scale,
    ));

    tracing::info!(
        interval_secs = config.refresh.interval_secs,
        timeout_ms = config.refresh.timeout_ms,
        "thermostatd started"
    );

    let mut ticker = refresh_ticker(config.refresh_interval());
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(err) = service.refresh_outside_temperature().await {
                    tracing::warn!(%err, "outside temperature refresh skipped");
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                tracing::info!("shutting down");
                break;
            }
        }
    }

    watcher.abort();
    Ok(())
}

/// Ticks every `period`. A refresh that outlasts the period pushes the next
/// tick back instead of firing the missed ones back to back.
fn refresh_ticker(period: Duration) -> Interval {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

async fn log_snapshots(mut rx: watch::Receiver<Snapshot>, preferred: Scale) {
    let initial = rx.borrow_and_update().clone();
    log_snapshot(&initial, preferred);
    while rx.changed().await.is_ok() {
        let snapshot = rx.borrow_and_update().clone();
        log_snapshot(&snapshot, preferred);
    }
}

fn log_snapshot(snapshot: &Snapshot, preferred: Scale) {
    let state = &snapshot.state;
    let target = state
        .run_state
        .target()
        .map(|target| target.converted_to(preferred).to_string());
    let inside = state.inside_temp.converted_to(preferred);

    match &state.outside_temp {
        FetchStatus::Fetched { value } => tracing::info!(
            revision = snapshot.revision,
            mode = state.run_state.label(),
            target = ?target,
            %inside,
            outside = %value.converted_to(preferred),
            "thermostat state"
        ),
        FetchStatus::Failed { reason } => tracing::warn!(
            revision = snapshot.revision,
            mode = state.run_state.label(),
            target = ?target,
            %inside,
            outside = state.outside_temp.label(),
            %reason,
            "thermostat state"
        ),
        FetchStatus::NotFetched | FetchStatus::InProgress => tracing::info!(
            revision = snapshot.revision,
            mode = state.run_state.label(),
            target = ?target,
            %inside,
            outside = state.outside_temp.label(),
            "thermostat state"
        ),
    }
}
