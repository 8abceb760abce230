//! Errors raised by application use-cases.

use thermostat_domain::error::ValidationError;

/// A fetch-lifecycle event arrived in a phase that does not accept it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot apply `{event}` to an outside temperature fetch that is `{phase}`")]
pub struct TransitionError {
    /// Label of the phase the fetch was in.
    pub phase: &'static str,
    /// Label of the rejected event.
    pub event: &'static str,
}

/// Top-level error for thermostat use-cases.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThermostatError {
    #[error("illegal fetch transition")]
    Transition(#[from] TransitionError),

    #[error("validation error")]
    Validation(#[from] ValidationError),
}
