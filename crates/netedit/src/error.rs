//! Error types for netedit operations.

use crate::edit::ValidationFailure;

/// Result type for netedit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while editing, observing or applying interface
/// configuration.
///
/// None of these is fatal: each one belongs to the current edit session and
/// is meant to be shown to the operator as a single message.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The pending edit failed validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    /// The interface name matches a reserved pattern.
    #[error("interface {name} cannot be edited")]
    NotEditable {
        /// The interface that was selected.
        name: String,
    },

    /// Interface not present in the latest observation.
    #[error("interface not found: {name}")]
    InterfaceNotFound {
        /// The interface name that was not found.
        name: String,
    },

    /// Session operation attempted from the wrong state.
    #[error("cannot {operation} while {state}")]
    InvalidState {
        /// What was attempted ("submit", "select", ...).
        operation: &'static str,
        /// The session state at the time.
        state: &'static str,
    },

    /// The applier rejected the request.
    #[error("apply failed: {reason}")]
    ApplyFailed {
        /// Human-readable reason reported by the backend.
        reason: String,
    },

    /// The observation source could not produce a snapshot.
    #[error("observation failed: {reason}")]
    ObservationFailed {
        /// Human-readable reason.
        reason: String,
    },

    /// A reserved interface pattern failed to compile.
    #[error("invalid reserved pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// The regex compile error.
        #[source]
        source: regex::Error,
    },

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport error.
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create an apply failure.
    pub fn apply_failed(reason: impl Into<String>) -> Self {
        Self::ApplyFailed {
            reason: reason.into(),
        }
    }

    /// Create an observation failure.
    pub fn observation(reason: impl Into<String>) -> Self {
        Self::ObservationFailed {
            reason: reason.into(),
        }
    }

    /// Check if this is a validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::InterfaceNotFound { .. })
    }

    /// Check if retrying the same operation later may succeed without
    /// operator changes.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ObservationFailed { .. } => true,
            #[cfg(feature = "http")]
            Self::Http(_) => true,
            _ => false,
        }
    }

    /// Get the validation failure, if this is one.
    pub fn validation(&self) -> Option<&ValidationFailure> {
        match self {
            Self::Validation(failure) => Some(failure),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::InterfaceNotFound {
            name: "eth9".into(),
        };
        assert_eq!(err.to_string(), "interface not found: eth9");

        let err = Error::NotEditable {
            name: "enp6s0f0".into(),
        };
        assert_eq!(err.to_string(), "interface enp6s0f0 cannot be edited");

        let err = Error::InvalidState {
            operation: "submit",
            state: "applying",
        };
        assert_eq!(err.to_string(), "cannot submit while applying");

        let err = Error::apply_failed("netplan apply exited with 1");
        assert_eq!(err.to_string(), "apply failed: netplan apply exited with 1");
    }

    #[test]
    fn test_validation_is_transparent() {
        let err = Error::from(ValidationFailure::GatewayRouteMismatch);
        assert!(err.is_validation());
        assert_eq!(err.to_string(), ValidationFailure::GatewayRouteMismatch.to_string());
        assert_eq!(err.validation(), Some(&ValidationFailure::GatewayRouteMismatch));
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::observation("connection refused").is_retryable());
        assert!(!Error::apply_failed("bad gateway").is_retryable());
        assert!(!Error::from(ValidationFailure::MissingMandatoryField).is_retryable());
    }

    #[test]
    fn test_is_not_found() {
        assert!(
            Error::InterfaceNotFound {
                name: "eth0".into()
            }
            .is_not_found()
        );
        assert!(!Error::observation("timeout").is_not_found());
    }
}
