//! Abstraction over the collaboration platform's review API

use async_trait::async_trait;
use tracing::info;

use crate::review::Review;
use crate::Result;

/// Review operations against a single repository
#[async_trait]
pub trait ReviewPlatform: Send + Sync {
    /// Name used in log output
    fn name(&self) -> &'static str;

    /// List every review submitted on a pull request
    async fn list_reviews(&self, pr_number: u64) -> Result<Vec<Review>>;

    /// Dismiss one review with a message
    async fn dismiss_review(&self, pr_number: u64, review_id: u64, message: &str) -> Result<()>;

    /// Request review from the given users
    async fn request_reviewers(&self, pr_number: u64, reviewers: &[String]) -> Result<()>;
}

/// Wraps a platform so reads go through and writes are only logged
#[derive(Debug, Clone)]
pub struct DryRun<P> {
    inner: P,
}

impl<P> DryRun<P> {
    /// Wrap a platform
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    /// The wrapped platform
    #[cfg(test)]
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

#[async_trait]
impl<P: ReviewPlatform> ReviewPlatform for DryRun<P> {
    fn name(&self) -> &'static str {
        "dry-run"
    }

    async fn list_reviews(&self, pr_number: u64) -> Result<Vec<Review>> {
        self.inner.list_reviews(pr_number).await
    }

    async fn dismiss_review(&self, pr_number: u64, review_id: u64, message: &str) -> Result<()> {
        info!(
            platform = self.inner.name(),
            pr = pr_number,
            review_id,
            message,
            "[Dry run] Would dismiss review"
        );
        Ok(())
    }

    async fn request_reviewers(&self, pr_number: u64, reviewers: &[String]) -> Result<()> {
        info!(
            platform = self.inner.name(),
            pr = pr_number,
            ?reviewers,
            "[Dry run] Would request reviewers"
        );
        Ok(())
    }
}

/// In-memory platform that records every call, for tests
#[cfg(test)]
pub(crate) mod fake {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::ReviewPlatform;
    use crate::review::Review;
    use crate::{Error, Result};

    /// A recorded platform call
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        ListReviews(u64),
        Dismiss { review_id: u64, message: String },
        Request(Vec<String>),
    }

    #[derive(Default)]
    pub struct FakePlatform {
        pub reviews: Vec<Review>,
        pub fail_dismiss: Option<u64>,
        pub slow_dismiss: Option<u64>,
        pub calls: Mutex<Vec<Call>>,
    }

    impl FakePlatform {
        pub fn with_reviews(reviews: Vec<Review>) -> Self {
            Self {
                reviews,
                ..Default::default()
            }
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl ReviewPlatform for FakePlatform {
        fn name(&self) -> &'static str {
            "fake"
        }

        async fn list_reviews(&self, pr_number: u64) -> Result<Vec<Review>> {
            self.record(Call::ListReviews(pr_number));
            Ok(self.reviews.clone())
        }

        async fn dismiss_review(
            &self,
            _pr_number: u64,
            review_id: u64,
            message: &str,
        ) -> Result<()> {
            if self.fail_dismiss == Some(review_id) {
                return Err(Error::external("dismiss review", "Bad credentials"));
            }
            let yields = if self.slow_dismiss == Some(review_id) { 5 } else { 1 };
            for _ in 0..yields {
                tokio::task::yield_now().await;
            }
            self.record(Call::Dismiss {
                review_id,
                message: message.to_string(),
            });
            Ok(())
        }

        async fn request_reviewers(&self, _pr_number: u64, reviewers: &[String]) -> Result<()> {
            self.record(Call::Request(reviewers.to_vec()));
            Ok(())
        }
    }
}
