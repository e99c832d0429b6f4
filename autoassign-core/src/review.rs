//! Pull request reviews and the approvals a new push invalidates

use serde::{Deserialize, Serialize};

/// Verdict recorded by a review
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewState {
    /// The reviewer approved the changes
    Approved,
    /// The reviewer asked for changes
    ChangesRequested,
    /// Comment-only review
    Commented,
    /// A review that was already dismissed
    Dismissed,
    /// Started but not submitted
    Pending,
    /// A state this tool doesn't know about
    Other(String),
}

impl ReviewState {
    /// Parse the platform's upper-case state label
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "APPROVED" => ReviewState::Approved,
            "CHANGES_REQUESTED" => ReviewState::ChangesRequested,
            "COMMENTED" => ReviewState::Commented,
            "DISMISSED" => ReviewState::Dismissed,
            "PENDING" => ReviewState::Pending,
            _ => ReviewState::Other(label.to_string()),
        }
    }

    /// Whether this is an approval
    pub fn is_approved(&self) -> bool {
        matches!(self, ReviewState::Approved)
    }
}

/// A submitted review on a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Review ID
    pub id: u64,
    /// Review verdict
    pub state: ReviewState,
    /// Login of the reviewer
    pub reviewer: String,
}

impl Review {
    /// Create a review record
    pub fn new(id: u64, state: ReviewState, reviewer: impl Into<String>) -> Self {
        Self {
            id,
            state,
            reviewer: reviewer.into(),
        }
    }
}

/// Approvals to dismiss and the people to ask again
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DismissalPlan {
    /// IDs of every approved review
    pub review_ids: Vec<u64>,
    /// Distinct approving reviewers with a login, in the order first seen
    pub reviewers: Vec<String>,
}

impl DismissalPlan {
    /// Collect approved reviews; all other states are left alone
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let mut plan = Self::default();
        for review in reviews.iter().filter(|r| r.state.is_approved()) {
            plan.review_ids.push(review.id);
            // Deleted accounts come back without a login.
            if !review.reviewer.is_empty() && !plan.reviewers.contains(&review.reviewer) {
                plan.reviewers.push(review.reviewer.clone());
            }
        }
        plan
    }

    /// Nothing to dismiss
    pub fn is_empty(&self) -> bool {
        self.review_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_states() {
        assert_eq!(ReviewState::parse("APPROVED"), ReviewState::Approved);
        assert_eq!(ReviewState::parse("approved"), ReviewState::Approved);
        assert_eq!(
            ReviewState::parse("CHANGES_REQUESTED"),
            ReviewState::ChangesRequested
        );
        assert_eq!(ReviewState::parse("COMMENTED"), ReviewState::Commented);
        assert_eq!(ReviewState::parse("DISMISSED"), ReviewState::Dismissed);
        assert_eq!(ReviewState::parse("PENDING"), ReviewState::Pending);
        assert_eq!(
            ReviewState::parse("SOMETHING_NEW"),
            ReviewState::Other("SOMETHING_NEW".to_string())
        );
    }

    #[test]
    fn test_plan_only_targets_approvals() {
        let reviews = vec![
            Review::new(1, ReviewState::Approved, "x"),
            Review::new(2, ReviewState::Commented, "y"),
            Review::new(3, ReviewState::ChangesRequested, "z"),
            Review::new(4, ReviewState::Dismissed, "w"),
        ];
        let plan = DismissalPlan::from_reviews(&reviews);
        assert_eq!(plan.review_ids, vec![1]);
        assert_eq!(plan.reviewers, vec!["x"]);
    }

    #[test]
    fn test_plan_collapses_repeat_approvers() {
        let reviews = vec![
            Review::new(10, ReviewState::Approved, "x"),
            Review::new(11, ReviewState::Approved, "v"),
            Review::new(12, ReviewState::Approved, "x"),
        ];
        let plan = DismissalPlan::from_reviews(&reviews);
        assert_eq!(plan.review_ids, vec![10, 11, 12]);
        assert_eq!(plan.reviewers, vec!["x", "v"]);
    }

    #[test]
    fn test_plan_dismisses_approvals_without_login() {
        let reviews = vec![
            Review::new(1, ReviewState::Approved, ""),
            Review::new(2, ReviewState::Approved, "x"),
        ];
        let plan = DismissalPlan::from_reviews(&reviews);
        assert_eq!(plan.review_ids, vec![1, 2]);
        assert_eq!(plan.reviewers, vec!["x"]);

        let ghost_only = DismissalPlan::from_reviews(&[Review::new(1, ReviewState::Approved, "")]);
        assert!(!ghost_only.is_empty());
        assert!(ghost_only.reviewers.is_empty());
    }

    #[test]
    fn test_plan_empty() {
        assert!(DismissalPlan::from_reviews(&[]).is_empty());
        let only_comments = vec![Review::new(1, ReviewState::Commented, "y")];
        assert!(DismissalPlan::from_reviews(&only_comments).is_empty());
    }
}
