//! # thermostat-domain
//!
//! Pure state model for a thermostat controller.
//!
//! ## Responsibilities
//! - Unit-tagged temperatures, split by role into [`Setpoint`](temperature::Setpoint)
//!   (target) and [`Reading`](temperature::Reading) (measured)
//! - The operating mode as a [`RunState`](run_state::RunState): off, or heating/cooling
//!   toward a setpoint
//! - The outside-temperature fetch lifecycle as a [`FetchStatus`](fetch_status::FetchStatus)
//! - The [`ThermostatState`](thermostat::ThermostatState) aggregate of the three
//!
//! Every value these types can hold is a meaningful thermostat state, so there
//! is no `is_valid` check anywhere in this crate. The one runtime check left is
//! the non-empty failure reason, enforced once at construction.
//!
//! ## Dependency rule
//! This crate has **no internal dependencies** and performs no IO.
//! Deciding *when* to change state is the job of `thermostat-app`.

pub mod conversion;
pub mod error;
pub mod fetch_status;
pub mod run_state;
pub mod temperature;
pub mod thermostat;
