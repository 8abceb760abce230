//! # thermostat-adapter-virtual
//!
//! Virtual/demo integration that simulates an outside-temperature source
//! for testing and demonstration purposes.
//!
//! ## Behaviours
//!
//! | Behaviour | Answer to every request |
//! |-----------|-------------------------|
//! | `steady` | The configured reading |
//! | `failing` | `SourceError::Unavailable` with the configured detail |
//! | `scripted` | The next scripted outcome; `Unavailable` once the script runs out |
//!
//! Any behaviour can be slowed down with a simulated latency.
//!
//! ## Dependency rule
//!
//! Depends on `thermostat-app` (port traits) and `thermostat-domain` only.

mod behaviour;

use std::collections::VecDeque;
use std::future::Future;
use std::time::Duration;

use thermostat_app::ports::{OutsideTemperatureSource, SourceError};
use thermostat_domain::temperature::Reading;
use tokio::sync::Mutex;

pub use behaviour::{ScriptedOutcome, VirtualBehaviour};

/// Simulated outside-temperature sensor.
#[derive(Debug)]
pub struct VirtualOutsideSensor {
    answers: Mutex<Answers>,
    latency: Option<Duration>,
}

#[derive(Debug)]
enum Answers {
    Steady(Reading),
    Failing(String),
    Scripted(VecDeque<ScriptedOutcome>),
}

impl Answers {
    fn next(&mut self) -> Result<Reading, SourceError> {
        match self {
            Self::Steady(reading) => Ok(*reading),
            Self::Failing(detail) => Err(SourceError::Unavailable {
                detail: detail.clone(),
            }),
            Self::Scripted(outcomes) => match outcomes.pop_front() {
                Some(outcome) => outcome.into_result(),
                None => Err(SourceError::Unavailable {
                    detail: "virtual script exhausted".to_string(),
                }),
            },
        }
    }
}

impl VirtualOutsideSensor {
    /// Build a sensor that behaves as described.
    #[must_use]
    pub fn new(behaviour: VirtualBehaviour) -> Self {
        let answers = match behaviour {
            VirtualBehaviour::Steady { reading } => Answers::Steady(reading),
            VirtualBehaviour::Failing { detail } => Answers::Failing(detail),
            VirtualBehaviour::Scripted { outcomes } => Answers::Scripted(outcomes.into()),
        };
        Self {
            answers: Mutex::new(answers),
            latency: None,
        }
    }

    /// Delay every answer by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }
}

impl OutsideTemperatureSource for VirtualOutsideSensor {
    fn fetch(&self) -> impl Future<Output = Result<Reading, SourceError>> + Send {
        async move {
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
            let answer = self.answers.lock().await.next();
            tracing::trace!(ok = answer.is_ok(), "virtual outside sensor answered");
            answer
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thermostat_domain::temperature::TemperatureUnit;

    fn reading(value: i32) -> Reading {
        Reading::new(TemperatureUnit::Celsius(value))
    }

    #[tokio::test]
    async fn should_answer_same_reading_when_steady() {
        let sensor = VirtualOutsideSensor::new(VirtualBehaviour::Steady {
            reading: reading(11),
        });
        assert_eq!(sensor.fetch().await, Ok(reading(11)));
        assert_eq!(sensor.fetch().await, Ok(reading(11)));
    }

    #[tokio::test]
    async fn should_report_unavailable_when_failing() {
        let sensor = VirtualOutsideSensor::new(VirtualBehaviour::Failing {
            detail: "weather service down".to_string(),
        });
        assert_eq!(
            sensor.fetch().await,
            Err(SourceError::Unavailable {
                detail: "weather service down".to_string()
            })
        );
    }

    #[tokio::test]
    async fn should_replay_script_in_order() {
        let sensor = VirtualOutsideSensor::new(VirtualBehaviour::Scripted {
            outcomes: vec![
                ScriptedOutcome::Reading {
                    reading: reading(3),
                },
                ScriptedOutcome::Malformed {
                    detail: "NaN".to_string(),
                },
                ScriptedOutcome::Reading {
                    reading: reading(4),
                },
            ],
        });

        assert_eq!(sensor.fetch().await, Ok(reading(3)));
        assert!(matches!(
            sensor.fetch().await,
            Err(SourceError::Malformed { .. })
        ));
        assert_eq!(sensor.fetch().await, Ok(reading(4)));
    }

    #[tokio::test]
    async fn should_report_unavailable_when_script_is_exhausted() {
        let sensor = VirtualOutsideSensor::new(VirtualBehaviour::Scripted { outcomes: vec![] });
        assert!(matches!(
            sensor.fetch().await,
            Err(SourceError::Unavailable { .. })
        ));
    }

    #[tokio::test]
    async fn should_delay_answer_by_latency() {
        let sensor = VirtualOutsideSensor::new(VirtualBehaviour::Steady {
            reading: reading(5),
        })
        .with_latency(Duration::from_millis(30));

        let started = tokio::time::Instant::now();
        sensor.fetch().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
    }
}
