//! Fetch lifecycle — the order in which a [`FetchStatus`] may change.
//!
//! ```text
//! NotFetched ──requested──▶ InProgress ──succeeded──▶ Fetched
//!                               ▲    └────failed────▶ Failed
//!                               └──────requested────── Fetched | Failed
//! ```
//!
//! [`FetchStatus`] alone accepts any phase; [`advance`] is what keeps the
//! orchestration from, say, jumping straight from `NotFetched` to `Fetched`.

use thermostat_domain::fetch_status::{FailureReason, FetchStatus};
use thermostat_domain::temperature::Reading;

use crate::error::TransitionError;

/// Something that happened to the outside-temperature request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchEvent {
    /// A (re-)fetch was started.
    Requested,
    /// The source answered with a reading.
    Succeeded(Reading),
    /// The source failed.
    Failed(FailureReason),
}

impl FetchEvent {
    /// Short machine-friendly name of the event.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Succeeded(_) => "succeeded",
            Self::Failed(_) => "failed",
        }
    }
}

/// Compute the phase that follows `current` once `event` happens.
///
/// # Errors
///
/// Returns [`TransitionError`] when `event` is not accepted in `current`:
/// a result without a pending request, or a second request while one is
/// still in flight.
pub fn advance(current: &FetchStatus, event: FetchEvent) -> Result<FetchStatus, TransitionError> {
    let rejected = TransitionError {
        phase: current.label(),
        event: event.label(),
    };
    match (current, event) {
        (
            FetchStatus::NotFetched | FetchStatus::Fetched { .. } | FetchStatus::Failed { .. },
            FetchEvent::Requested,
        ) => Ok(FetchStatus::InProgress),
        (FetchStatus::InProgress, FetchEvent::Succeeded(value)) => Ok(FetchStatus::Fetched { value }),
        (FetchStatus::InProgress, FetchEvent::Failed(reason)) => Ok(FetchStatus::Failed { reason }),
        (FetchStatus::InProgress, FetchEvent::Requested)
        | (
            FetchStatus::NotFetched | FetchStatus::Fetched { .. } | FetchStatus::Failed { .. },
            FetchEvent::Succeeded(_) | FetchEvent::Failed(_),
        ) => Err(rejected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thermostat_domain::temperature::TemperatureUnit;

    fn reading() -> Reading {
        Reading::new(TemperatureUnit::Celsius(7))
    }

    fn reason(text: &str) -> FailureReason {
        FailureReason::new(text).unwrap()
    }

    #[test]
    fn should_start_fetch_when_not_fetched() {
        let next = advance(&FetchStatus::NotFetched, FetchEvent::Requested).unwrap();
        assert_eq!(next, FetchStatus::InProgress);
    }

    #[test]
    fn should_store_reading_when_fetch_succeeds() {
        let next = advance(&FetchStatus::InProgress, FetchEvent::Succeeded(reading())).unwrap();
        assert_eq!(next, FetchStatus::fetched(reading()));
    }

    #[test]
    fn should_store_reason_when_fetch_fails() {
        let next = advance(&FetchStatus::InProgress, FetchEvent::Failed(reason("timeout"))).unwrap();
        assert_eq!(next, FetchStatus::failed("timeout").unwrap());
    }

    #[test]
    fn should_refetch_after_success() {
        let next = advance(&FetchStatus::fetched(reading()), FetchEvent::Requested).unwrap();
        assert_eq!(next, FetchStatus::InProgress);
    }

    #[test]
    fn should_forget_failure_reason_when_refetching() {
        let failed = FetchStatus::failed("timeout").unwrap();
        let next = advance(&failed, FetchEvent::Requested).unwrap();
        assert_eq!(next, FetchStatus::InProgress);
    }

    #[test]
    fn should_reject_result_without_pending_request() {
        let err = advance(&FetchStatus::NotFetched, FetchEvent::Succeeded(reading())).unwrap_err();
        assert_eq!(
            err,
            TransitionError {
                phase: "not_fetched",
                event: "succeeded",
            }
        );
    }

    #[test]
    fn should_reject_second_request_while_in_flight() {
        let err = advance(&FetchStatus::InProgress, FetchEvent::Requested).unwrap_err();
        assert_eq!(err.phase, "in_progress");
        assert_eq!(err.event, "requested");
    }

    #[test]
    fn should_reject_failure_after_success() {
        let result = advance(
            &FetchStatus::fetched(reading()),
            FetchEvent::Failed(reason("late error")),
        );
        assert!(result.is_err());
    }

    #[test]
    fn should_accept_exactly_five_transitions() {
        let phases = [
            FetchStatus::NotFetched,
            FetchStatus::InProgress,
            FetchStatus::failed("boom").unwrap(),
            FetchStatus::fetched(reading()),
        ];
        let events = [
            FetchEvent::Requested,
            FetchEvent::Succeeded(reading()),
            FetchEvent::Failed(reason("boom")),
        ];

        let accepted = phases
            .iter()
            .flat_map(|phase| events.iter().map(move |event| (phase, event)))
            .filter(|(phase, event)| advance(phase, (*event).clone()).is_ok())
            .count();
        assert_eq!(accepted, 5);
    }

    #[test]
    fn should_name_phase_and_event_of_every_rejected_pair() {
        let rejected = [
            (FetchStatus::InProgress, FetchEvent::Requested),
            (FetchStatus::NotFetched, FetchEvent::Succeeded(reading())),
            (FetchStatus::NotFetched, FetchEvent::Failed(reason("boom"))),
            (FetchStatus::fetched(reading()), FetchEvent::Succeeded(reading())),
            (FetchStatus::fetched(reading()), FetchEvent::Failed(reason("boom"))),
            (FetchStatus::failed("boom").unwrap(), FetchEvent::Succeeded(reading())),
            (FetchStatus::failed("boom").unwrap(), FetchEvent::Failed(reason("boom"))),
        ];

        for (phase, event) in rejected {
            let expected = TransitionError {
                phase: phase.label(),
                event: event.label(),
            };
            assert_eq!(advance(&phase, event), Err(expected));
        }
    }
}
