//! # thermostat-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the driven port adapters must implement:
//!   - `OutsideTemperatureSource` — answers one outside-temperature request
//! - Enforce the order of fetch-lifecycle transitions (`fetch_lifecycle`)
//! - Hold the current thermostat state as a series of immutable snapshots
//!   with a single serialized writer (`snapshot_store`)
//! - Provide the `ThermostatService` use-case: change mode, record inside
//!   readings, refresh the outside temperature
//!
//! ## Dependency rule
//! Depends on `thermostat-domain` only (plus `tokio::sync`/`tokio::time`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod error;
pub mod fetch_lifecycle;
pub mod ports;
pub mod services;
pub mod snapshot_store;
