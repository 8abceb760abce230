//! Fetch status — where the outside-temperature request currently stands.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::temperature::Reading;

/// Why fetching the outside temperature failed. Never empty.
///
/// A raw string cannot stand in for it:
///
/// ```compile_fail
/// use thermostat_domain::fetch_status::FetchStatus;
///
/// let _ = FetchStatus::Failed { reason: String::new() };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FailureReason(String);

impl FailureReason {
    /// Wrap a failure description, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyFailureReason`] when nothing but
    /// whitespace is left.
    pub fn new(reason: impl Into<String>) -> Result<Self, ValidationError> {
        let reason = reason.into();
        let trimmed = reason.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyFailureReason);
        }
        if trimmed.len() == reason.len() {
            Ok(Self(reason))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FailureReason {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FailureReason> for String {
    fn from(value: FailureReason) -> Self {
        value.0
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of the outside-temperature reading.
///
/// Each distinguishable situation has its own variant: never asked, waiting
/// on an answer, failed (with a reason), or fetched (with a value). The
/// order in which these are visited is enforced by whoever drives the
/// fetch, not by this type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchStatus {
    #[default]
    NotFetched,
    InProgress,
    Failed {
        reason: FailureReason,
    },
    Fetched {
        value: Reading,
    },
}

impl FetchStatus {
    /// Build a [`Failed`](Self::Failed) status from a description.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyFailureReason`] when `reason` is blank.
    pub fn failed(reason: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self::Failed {
            reason: FailureReason::new(reason)?,
        })
    }

    #[must_use]
    pub fn fetched(value: Reading) -> Self {
        Self::Fetched { value }
    }

    /// Short machine-friendly name of the phase.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotFetched => "not_fetched",
            Self::InProgress => "in_progress",
            Self::Failed { .. } => "failed",
            Self::Fetched { .. } => "fetched",
        }
    }
}

impl std::fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFetched => f.write_str("not fetched"),
            Self::InProgress => f.write_str("fetching"),
            Self::Failed { reason } => write!(f, "failed: {reason}"),
            Self::Fetched { value } => value.fmt(f),
        }
    }
}
