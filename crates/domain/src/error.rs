//! Error types raised by domain constructors.

/// A constructor was handed data that cannot form a domain value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A fetch failure must say why it failed.
    #[error("failure reason must not be empty")]
    EmptyFailureReason,
}
