//! Error types for GitHub operations

use thiserror::Error;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub operations
#[derive(Error, Debug)]
pub enum Error {
    /// GitHub API error
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    /// Authentication error
    #[error("GitHub authentication error: {0}")]
    Auth(String),

    /// Pull request not found
    #[error("Pull request #{0} not found")]
    PrNotFound(u64),

    /// Rate limit exceeded
    #[error("GitHub rate limit exceeded: {0}")]
    RateLimited(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Classify an octocrab error raised while working on a pull request
    pub fn from_api(err: octocrab::Error, pr_number: u64) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. } => {
                let message = source.message.as_str();
                if message.contains("Bad credentials") {
                    Error::Auth("Invalid GitHub token".to_string())
                } else if message.contains("rate limit") {
                    Error::RateLimited(message.to_string())
                } else if message.contains("Not Found") {
                    Error::PrNotFound(pr_number)
                } else {
                    Error::Api(err)
                }
            }
            _ => Error::Api(err),
        }
    }

    /// Wrap as the core's external dependency error for `operation`
    pub fn into_external(self, operation: &str) -> autoassign_core::Error {
        autoassign_core::Error::external(operation, self)
    }
}
