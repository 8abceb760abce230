//! Run state — what the thermostat is currently doing.

use serde::{Deserialize, Serialize};

use crate::temperature::Setpoint;

/// Operating mode of the thermostat.
///
/// Exactly one mode holds at a time, and a [`Setpoint`] exists exactly when
/// the thermostat is heating or cooling. `Off` has nowhere to put a target:
///
/// ```compile_fail
/// use thermostat_domain::run_state::RunState;
/// use thermostat_domain::temperature::{Setpoint, TemperatureUnit};
///
/// let _ = RunState::Off { target: Setpoint::new(TemperatureUnit::Celsius(20)) };
/// ```
///
/// and heating cannot be requested without one:
///
/// ```compile_fail
/// use thermostat_domain::run_state::RunState;
///
/// let _ = RunState::Heating {};
/// ```
///
/// Matches over a run state must name every mode, so adding one later
/// surfaces at every call site:
///
/// ```compile_fail
/// use thermostat_domain::run_state::RunState;
///
/// fn is_active(state: RunState) -> bool {
///     match state {
///         RunState::Heating { .. } => true,
///         RunState::Off => false,
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RunState {
    #[default]
    Off,
    Heating {
        target: Setpoint,
    },
    Cooling {
        target: Setpoint,
    },
}

impl RunState {
    #[must_use]
    pub fn heating(target: Setpoint) -> Self {
        Self::Heating { target }
    }

    #[must_use]
    pub fn cooling(target: Setpoint) -> Self {
        Self::Cooling { target }
    }

    /// The temperature being driven toward, if any.
    #[must_use]
    pub fn target(self) -> Option<Setpoint> {
        match self {
            Self::Off => None,
            Self::Heating { target } | Self::Cooling { target } => Some(target),
        }
    }

    /// Short machine-friendly name of the mode.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Heating { .. } => "heating",
            Self::Cooling { .. } => "cooling",
        }
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Off => f.write_str("off"),
            Self::Heating { target } => write!(f, "heating to {target}"),
            Self::Cooling { target } => write!(f, "cooling to {target}"),
        }
    }
}
