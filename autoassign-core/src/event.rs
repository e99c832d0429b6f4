//! Pull request event payloads and action classification

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Message attached to dismissals when a draft is marked ready for review
pub const READY_FOR_REVIEW_REASON: &str = "dismissed because draft PR marked ready for review";

/// Message attached to dismissals when new commits are pushed
pub const SYNCHRONIZE_REASON: &str = "dismissed because new commit(s) pushed";

/// A user reference as it appears in event payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login handle
    pub login: String,
}

/// Repository owner/name pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository name
    pub name: String,
    /// Repository owner
    pub owner: User,
}

/// Base side of a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseRef {
    /// Repository the pull request targets
    pub repo: Repository,
}

/// The pull request attributes the automation consumes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Whether the PR is a draft
    #[serde(default)]
    pub draft: bool,
    /// PR author
    pub user: User,
    /// Base ref (carries the target repository)
    pub base: BaseRef,
    /// Users review has already been requested from
    #[serde(default)]
    pub requested_reviewers: Vec<User>,
}

impl PullRequest {
    /// Author login
    pub fn author(&self) -> &str {
        &self.user.login
    }

    /// Owner of the target repository
    pub fn owner(&self) -> &str {
        &self.base.repo.owner.login
    }

    /// Name of the target repository
    pub fn repo(&self) -> &str {
        &self.base.repo.name
    }
}

/// A `pull_request` event as delivered to the CI job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestEvent {
    /// Raw action label (`opened`, `synchronize`, ...)
    pub action: String,
    /// The pull request the event is about
    pub pull_request: PullRequest,
}

/// Minimal shape used to give a precise error for non-PR payloads
#[derive(Deserialize)]
struct AnyEvent {
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    pull_request: Option<serde_json::Value>,
}

impl PullRequestEvent {
    /// Parse an event payload from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let probe: AnyEvent = serde_json::from_str(json)?;
        let pull_request = probe.pull_request.ok_or_else(|| {
            Error::Event("event payload has no `pull_request`".to_string())
        })?;
        let action = probe
            .action
            .ok_or_else(|| Error::Event("event payload has no `action`".to_string()))?;

        Ok(Self {
            action,
            pull_request: serde_json::from_value(pull_request)?,
        })
    }

    /// Load an event payload from the file the CI runner wrote
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Event(format!(
                "Failed to read event payload {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&contents)
    }

    /// Classified action
    pub fn kind(&self) -> EventAction {
        EventAction::parse(&self.action)
    }
}

/// The action labels the automation distinguishes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventAction {
    /// A draft was converted to an open pull request
    ReadyForReview,
    /// New commits were pushed
    Synchronize,
    /// Anything else (`opened`, `reopened`, `edited`, ...)
    Other(String),
}

impl EventAction {
    /// Classify an action label
    pub fn parse(action: &str) -> Self {
        match action {
            "ready_for_review" => EventAction::ReadyForReview,
            "synchronize" => EventAction::Synchronize,
            other => EventAction::Other(other.to_string()),
        }
    }

    /// Dismissal message for actions that invalidate approvals
    ///
    /// `None` means the action routes to reviewer assignment instead.
    pub fn dismissal_reason(&self) -> Option<&'static str> {
        match self {
            EventAction::ReadyForReview => Some(READY_FOR_REVIEW_REASON),
            EventAction::Synchronize => Some(SYNCHRONIZE_REASON),
            EventAction::Other(_) => None,
        }
    }
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::ReadyForReview => write!(f, "ready_for_review"),
            EventAction::Synchronize => write!(f, "synchronize"),
            EventAction::Other(action) => write!(f, "{}", action),
        }
    }
}

/// Whether a workflow event name carries a pull request payload
pub fn is_pull_request_event(event_name: &str) -> bool {
    matches!(event_name, "pull_request" | "pull_request_target")
}
