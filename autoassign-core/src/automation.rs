//! Event-driven reviewer automation
//!
//! One run handles one pull request event and executes exactly one flow:
//! - `ready_for_review` / `synchronize`: dismiss approvals and re-request
//!   review from the people who gave them
//! - anything else: top up requested reviewers from the candidate pool

use futures::future::join_all;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::assign::{plan_assignment, AssignmentDecision, SkipReason};
use crate::config::Config;
use crate::event::{PullRequest, PullRequestEvent};
use crate::platform::ReviewPlatform;
use crate::review::DismissalPlan;
use crate::Result;

/// What a run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Approvals were dismissed and these reviewers were asked again
    ReReviewRequested(Vec<String>),
    /// No approvals to dismiss
    NothingToReReview,
    /// Approvals were dismissed but none of their authors can be asked again
    ApprovalsDismissed(usize),
    /// These reviewers were added
    ReviewersRequested(Vec<String>),
    /// Assignment was not needed
    Skipped(SkipReason),
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::ReReviewRequested(r) => {
                write!(f, "re-requested review from {}", r.join(", "))
            }
            Outcome::NothingToReReview => write!(f, "no need to re-request any reviews"),
            Outcome::ApprovalsDismissed(n) => {
                write!(f, "dismissed {} approval(s), nobody to re-request", n)
            }
            Outcome::ReviewersRequested(r) => {
                write!(f, "requested reviews from {}", r.join(", "))
            }
            Outcome::Skipped(reason) => write!(f, "no reviewers requested: {}", reason),
        }
    }
}

/// Runs the reviewer flows against a platform
pub struct Automation<P> {
    platform: P,
    config: Config,
    rng: StdRng,
}

impl<P: ReviewPlatform> Automation<P> {
    /// Create an automation with an entropy-seeded RNG
    pub fn new(platform: P, config: Config) -> Self {
        Self {
            platform,
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Use a fixed seed for reviewer selection
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// The platform this automation talks to
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Handle one pull request event
    pub async fn run(&mut self, event: &PullRequestEvent) -> Result<Outcome> {
        let action = event.kind();
        info!(
            platform = self.platform.name(),
            pr = event.pull_request.number,
            %action,
            "Handling pull request event"
        );

        match action.dismissal_reason() {
            Some(reason) => self.rereview(event.pull_request.number, reason).await,
            None => self.assign(&event.pull_request).await,
        }
    }

    /// Dismiss every approval and re-request review from the approvers
    ///
    /// Dismissals run concurrently and are all awaited, even when one fails.
    /// The re-request is only sent once every dismissal has succeeded.
    pub async fn rereview(&self, pr_number: u64, reason: &str) -> Result<Outcome> {
        let reviews = self.platform.list_reviews(pr_number).await?;
        let plan = DismissalPlan::from_reviews(&reviews);
        debug!(
            pr = pr_number,
            reviews = reviews.len(),
            approvals = plan.review_ids.len(),
            "Fetched reviews"
        );

        if plan.is_empty() {
            info!(pr = pr_number, "No need to re-request any reviews");
            return Ok(Outcome::NothingToReReview);
        }

        let results = join_all(
            plan.review_ids
                .iter()
                .map(|&id| self.platform.dismiss_review(pr_number, id, reason)),
        )
        .await;

        let mut first_err = None;
        for (id, result) in plan.review_ids.iter().zip(results) {
            if let Err(e) = result {
                warn!(pr = pr_number, review_id = *id, error = %e, "Failed to dismiss review");
                first_err.get_or_insert(e);
            }
        }
        if let Some(e) = first_err {
            return Err(e);
        }
        info!(
            pr = pr_number,
            dismissed = plan.review_ids.len(),
            reason,
            "Dismissed approvals"
        );

        if plan.reviewers.is_empty() {
            info!(pr = pr_number, "Approvers no longer exist, nobody to re-request");
            return Ok(Outcome::ApprovalsDismissed(plan.review_ids.len()));
        }

        info!(pr = pr_number, reviewers = ?plan.reviewers, "Re-requesting review");
        self.platform
            .request_reviewers(pr_number, &plan.reviewers)
            .await?;

        Ok(Outcome::ReReviewRequested(plan.reviewers))
    }

    /// Request random reviewers until the desired count is reached
    pub async fn assign(&mut self, pr: &PullRequest) -> Result<Outcome> {
        let decision = plan_assignment(pr, &self.config, &mut self.rng)?;

        let reviewers = match decision {
            AssignmentDecision::Skip(reason) => {
                info!(pr = pr.number, %reason, "Not requesting reviewers");
                return Ok(Outcome::Skipped(reason));
            }
            AssignmentDecision::Request(reviewers) => reviewers,
        };

        info!(
            pr = pr.number,
            requested = pr.requested_reviewers.len(),
            desired = self.config.reviewer_count,
            reviewers = ?reviewers,
            "Requesting reviews"
        );
        self.platform.request_reviewers(pr.number, &reviewers).await?;

        Ok(Outcome::ReviewersRequested(reviewers))
    }
}

impl<P> std::fmt::Debug for Automation<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Automation")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
