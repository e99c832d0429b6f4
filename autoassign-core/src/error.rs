//! Error types for reviewer automation

use thiserror::Error;

/// Result type alias for reviewer automation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for reviewer automation operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed or missing action input
    #[error("Configuration error: {0}")]
    Config(String),

    /// More reviewers were requested than the candidate pool can supply
    #[error(
        "You requested more reviewers than you provided in the approver list \
         (need {requested}, have {available})"
    )]
    NotEnoughReviewers {
        /// Reviewers still needed to reach the desired count
        requested: usize,
        /// Distinct candidates left once the author is excluded
        available: usize,
    },

    /// The triggering event payload is missing or unusable
    #[error("Event error: {0}")]
    Event(String),

    /// A call to the collaboration platform failed
    #[error("External dependency error during {operation}: {message}")]
    External {
        /// The platform operation that failed
        operation: String,
        /// Description of the failure
        message: String,
    },
}

impl Error {
    /// Build an external dependency error for the named operation
    pub fn external(operation: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Error::External {
            operation: operation.into(),
            message: message.to_string(),
        }
    }

    /// Whether this is a configuration problem rather than a runtime failure
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_) | Error::NotEnoughReviewers { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_enough_reviewers_message() {
        let err = Error::NotEnoughReviewers {
            requested: 2,
            available: 1,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("You requested more reviewers than you provided"));
        assert!(msg.contains("need 2, have 1"));
        assert!(err.is_config());
    }

    #[test]
    fn test_external_error() {
        let err = Error::external("dismiss review", "Bad credentials");
        assert_eq!(
            err.to_string(),
            "External dependency error during dismiss review: Bad credentials"
        );
        assert!(!err.is_config());
    }
}
