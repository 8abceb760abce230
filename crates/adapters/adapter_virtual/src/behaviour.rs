//! Configurable behaviour of the virtual sensor.

use serde::{Deserialize, Serialize};
use thermostat_app::ports::SourceError;
use thermostat_domain::temperature::Reading;

/// How a [`VirtualOutsideSensor`](crate::VirtualOutsideSensor) answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "behaviour", rename_all = "snake_case")]
pub enum VirtualBehaviour {
    /// Always answer with `reading`.
    Steady { reading: Reading },
    /// Always fail as unavailable.
    Failing { detail: String },
    /// Answer with each outcome in turn.
    Scripted { outcomes: Vec<ScriptedOutcome> },
}

/// One canned answer of a scripted sensor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ScriptedOutcome {
    Reading { reading: Reading },
    Unavailable { detail: String },
    Malformed { detail: String },
}

impl ScriptedOutcome {
    pub(crate) fn into_result(self) -> Result<Reading, SourceError> {
        match self {
            Self::Reading { reading } => Ok(reading),
            Self::Unavailable { detail } => Err(SourceError::Unavailable { detail }),
            Self::Malformed { detail } => Err(SourceError::Malformed { detail }),
        }
    }
}
