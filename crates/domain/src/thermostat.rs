//! Thermostat state — the aggregate of run mode, inside reading and outside
//! fetch status.
//!
//! Any combination of the three fields is a state a real thermostat can be
//! in, so the aggregate has no validation step and exposes its fields
//! directly. Changes produce a new value:
//!
//! ```
//! use thermostat_domain::fetch_status::FetchStatus;
//! use thermostat_domain::run_state::RunState;
//! use thermostat_domain::temperature::{Reading, Setpoint, TemperatureUnit};
//! use thermostat_domain::thermostat::ThermostatState;
//!
//! let state = ThermostatState::new(
//!     RunState::heating(Setpoint::new(TemperatureUnit::Celsius(25))),
//!     Reading::new(TemperatureUnit::Fahrenheit(70)),
//!     FetchStatus::InProgress,
//! );
//! let state = state.with_run_state(RunState::Off);
//! assert_eq!(state.run_state.target(), None);
//! ```

use serde::{Deserialize, Serialize};

use crate::fetch_status::FetchStatus;
use crate::run_state::RunState;
use crate::temperature::Reading;

/// Complete state of one thermostat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThermostatState {
    pub run_state: RunState,
    pub inside_temp: Reading,
    pub outside_temp: FetchStatus,
}

impl ThermostatState {
    #[must_use]
    pub fn new(run_state: RunState, inside_temp: Reading, outside_temp: FetchStatus) -> Self {
        Self {
            run_state,
            inside_temp,
            outside_temp,
        }
    }

    #[must_use]
    pub fn with_run_state(self, run_state: RunState) -> Self {
        Self { run_state, ..self }
    }

    #[must_use]
    pub fn with_inside_temp(self, inside_temp: Reading) -> Self {
        Self {
            inside_temp,
            ..self
        }
    }

    #[must_use]
    pub fn with_outside_temp(self, outside_temp: FetchStatus) -> Self {
        Self {
            outside_temp,
            ..self
        }
    }
}

impl std::fmt::Display for ThermostatState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, inside {}, outside {}",
            self.run_state, self.inside_temp, self.outside_temp
        )
    }
}
