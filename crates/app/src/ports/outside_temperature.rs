//! Outside-temperature port — a single request/response exchange with
//! whatever knows the temperature outside (weather API, remote sensor, …).

use std::future::Future;
use std::time::Duration;

use thermostat_domain::temperature::Reading;

/// Why a source could not produce a reading.
///
/// Every variant renders to a non-empty message, which becomes the
/// failure reason shown to consumers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// The source could not be reached.
    #[error("outside temperature source unavailable: {detail}")]
    Unavailable { detail: String },
    /// No answer arrived in time.
    #[error("outside temperature request timed out after {}ms", .after.as_millis())]
    Timeout { after: Duration },
    /// The source answered with something that is not a temperature.
    #[error("outside temperature source returned malformed data: {detail}")]
    Malformed { detail: String },
}

/// Fetches the current outside temperature.
pub trait OutsideTemperatureSource {
    /// Ask for one reading.
    fn fetch(&self) -> impl Future<Output = Result<Reading, SourceError>> + Send;
}

impl<T: OutsideTemperatureSource + Send + Sync> OutsideTemperatureSource for std::sync::Arc<T> {
    fn fetch(&self) -> impl Future<Output = Result<Reading, SourceError>> + Send {
        (**self).fetch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thermostat_domain::temperature::TemperatureUnit;

    struct Fixed(Reading);

    impl OutsideTemperatureSource for Fixed {
        fn fetch(&self) -> impl Future<Output = Result<Reading, SourceError>> + Send {
            let reading = self.0;
            async move { Ok(reading) }
        }
    }

    #[tokio::test]
    async fn should_delegate_through_arc() {
        let reading = Reading::new(TemperatureUnit::Celsius(9));
        let source = std::sync::Arc::new(Fixed(reading));
        assert_eq!(source.fetch().await, Ok(reading));
    }

    #[test]
    fn should_render_non_empty_message_for_every_variant() {
        let errors = [
            SourceError::Unavailable {
                detail: String::new(),
            },
            SourceError::Timeout {
                after: Duration::from_millis(250),
            },
            SourceError::Malformed {
                detail: String::new(),
            },
        ];
        for err in errors {
            assert!(!err.to_string().trim().is_empty());
        }
    }

    #[test]
    fn should_mention_elapsed_time_in_timeout_message() {
        let err = SourceError::Timeout {
            after: Duration::from_millis(250),
        };
        assert_eq!(
            err.to_string(),
            "outside temperature request timed out after 250ms"
        );
    }
}
