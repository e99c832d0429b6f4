//! Reviewer assignment policy
//!
//! Decides whether a pull request needs more reviewers and, if so, which
//! candidates to request. Pure: the caller performs the request.

use rand::Rng;
use tracing::debug;

use crate::config::Config;
use crate::event::PullRequest;
use crate::shuffle::{dedup, sample_distinct};
use crate::{Error, Result};

/// Why no reviewers were requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The only-drafts gate is on and the PR is not a draft
    NotDraft,
    /// The PR already has enough requested reviewers
    AlreadySatisfied {
        /// Reviewers already requested
        requested: usize,
        /// Desired reviewer count
        desired: usize,
    },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotDraft => write!(f, "pull request is not a draft"),
            SkipReason::AlreadySatisfied { requested, desired } => write!(
                f,
                "pull request already has enough reviewers ({}/{})",
                requested, desired
            ),
        }
    }
}

/// Outcome of the assignment policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentDecision {
    /// Take no action
    Skip(SkipReason),
    /// Request review from these distinct handles
    Request(Vec<String>),
}

/// Whether the only-drafts gate lets this pull request through
pub fn passes_draft_gate(pr: &PullRequest, config: &Config) -> bool {
    !config.only_drafts || pr.draft
}

/// Candidate pool with the author removed and repeats collapsed
pub fn candidate_pool(reviewers: &[String], author: &str) -> Vec<String> {
    let filtered: Vec<String> = reviewers
        .iter()
        .filter(|r| r.as_str() != author)
        .cloned()
        .collect();
    dedup(&filtered)
}

/// Decide which reviewers to add to a pull request
///
/// Fails with [`Error::NotEnoughReviewers`] when the deficit exceeds the
/// number of distinct non-author candidates.
pub fn plan_assignment<R: Rng + ?Sized>(
    pr: &PullRequest,
    config: &Config,
    rng: &mut R,
) -> Result<AssignmentDecision> {
    if !passes_draft_gate(pr, config) {
        return Ok(AssignmentDecision::Skip(SkipReason::NotDraft));
    }

    let requested = pr.requested_reviewers.len();
    let desired = config.reviewer_count as usize;
    if requested >= desired {
        return Ok(AssignmentDecision::Skip(SkipReason::AlreadySatisfied {
            requested,
            desired,
        }));
    }

    let deficit = desired - requested;
    let pool = candidate_pool(&config.reviewers, pr.author());
    debug!(
        deficit,
        pool_size = pool.len(),
        author = pr.author(),
        "Selecting reviewers"
    );

    if deficit > pool.len() {
        return Err(Error::NotEnoughReviewers {
            requested: deficit,
            available: pool.len(),
        });
    }

    Ok(AssignmentDecision::Request(sample_distinct(
        &pool, deficit, rng,
    )))
}
