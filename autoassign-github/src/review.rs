//! Pull request review operations

use async_trait::async_trait;
use autoassign_core::{Review, ReviewPlatform, ReviewState};
use octocrab::models::pulls::{Review as OctocrabReview, ReviewState as OctocrabReviewState};
use serde::Serialize;
use tracing::debug;

use crate::{Error, GitHubClient};

const PER_PAGE: u8 = 100;

#[derive(Serialize)]
struct DismissBody<'a> {
    message: &'a str,
    event: &'static str,
}

#[derive(Serialize)]
struct ReviewRequestBody<'a> {
    reviewers: &'a [String],
}

fn convert_state(state: Option<OctocrabReviewState>) -> ReviewState {
    match state {
        Some(OctocrabReviewState::Approved) => ReviewState::Approved,
        Some(OctocrabReviewState::ChangesRequested) => ReviewState::ChangesRequested,
        Some(OctocrabReviewState::Commented) => ReviewState::Commented,
        Some(OctocrabReviewState::Dismissed) => ReviewState::Dismissed,
        Some(OctocrabReviewState::Pending) => ReviewState::Pending,
        #[allow(unreachable_patterns)]
        Some(other) => ReviewState::Other(format!("{:?}", other)),
        None => ReviewState::Other("UNKNOWN".to_string()),
    }
}

fn convert_review(r: OctocrabReview) -> Review {
    Review {
        id: r.id.0,
        state: convert_state(r.state),
        reviewer: r.user.map(|u| u.login).unwrap_or_default(),
    }
}

#[async_trait]
impl ReviewPlatform for GitHubClient {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn list_reviews(&self, pr_number: u64) -> autoassign_core::Result<Vec<Review>> {
        debug!(pr = pr_number, "Fetching pull request reviews");

        let first_page = self
            .client()
            .pulls(self.owner(), self.repo())
            .list_reviews(pr_number)
            .per_page(PER_PAGE)
            .send()
            .await
            .map_err(|e| Error::from_api(e, pr_number).into_external("list reviews"))?;

        let reviews = self
            .client()
            .all_pages(first_page)
            .await
            .map_err(|e| Error::from_api(e, pr_number).into_external("list reviews"))?;

        debug!(pr = pr_number, count = reviews.len(), "Fetched reviews");

        Ok(reviews.into_iter().map(convert_review).collect())
    }

    async fn dismiss_review(
        &self,
        pr_number: u64,
        review_id: u64,
        message: &str,
    ) -> autoassign_core::Result<()> {
        debug!(pr = pr_number, review_id, "Dismissing review");

        let route = self.pull_route(pr_number, &format!("reviews/{}/dismissals", review_id));
        let body = DismissBody {
            message,
            event: "DISMISS",
        };

        let _: serde_json::Value = self
            .client()
            .put(route, Some(&body))
            .await
            .map_err(|e| Error::from_api(e, pr_number).into_external("dismiss review"))?;

        Ok(())
    }

    async fn request_reviewers(
        &self,
        pr_number: u64,
        reviewers: &[String],
    ) -> autoassign_core::Result<()> {
        debug!(pr = pr_number, ?reviewers, "Requesting reviewers");

        let route = self.pull_route(pr_number, "requested_reviewers");
        let body = ReviewRequestBody { reviewers };

        let _: serde_json::Value = self
            .client()
            .post(route, Some(&body))
            .await
            .map_err(|e| Error::from_api(e, pr_number).into_external("request reviewers"))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_state() {
        assert_eq!(
            convert_state(Some(OctocrabReviewState::Approved)),
            ReviewState::Approved
        );
        assert_eq!(
            convert_state(Some(OctocrabReviewState::ChangesRequested)),
            ReviewState::ChangesRequested
        );
        assert_eq!(
            convert_state(None),
            ReviewState::Other("UNKNOWN".to_string())
        );
    }

    #[test]
    fn test_dismiss_body_shape() {
        let body = DismissBody {
            message: "dismissed because new commit(s) pushed",
            event: "DISMISS",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "message": "dismissed because new commit(s) pushed",
                "event": "DISMISS"
            })
        );
    }

    #[test]
    fn test_review_request_body_shape() {
        let reviewers = vec!["x".to_string(), "y".to_string()];
        let body = ReviewRequestBody {
            reviewers: &reviewers,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "reviewers": ["x", "y"] })
        );
    }
}
