//! GitHub API client using octocrab

use crate::{Error, Result};
use octocrab::Octocrab;
use tracing::info;

/// GitHub API client bound to one repository
pub struct GitHubClient {
    client: Octocrab,
    owner: String,
    repo: String,
}

impl GitHubClient {
    /// Create a new GitHub client for the specified repository
    ///
    /// `api_url` points the client at a GitHub Enterprise Server instance;
    /// `None` uses api.github.com.
    pub fn new(
        token: &str,
        owner: impl Into<String>,
        repo: impl Into<String>,
        api_url: Option<&str>,
    ) -> Result<Self> {
        let owner = owner.into();
        let repo = repo.into();

        let token = token.trim();
        if token.is_empty() {
            return Err(Error::Auth("GitHub token is empty".to_string()));
        }

        let mut builder = Octocrab::builder().personal_token(token.to_string());
        if let Some(url) = api_url.map(str::trim).filter(|u| !u.is_empty()) {
            builder = builder
                .base_uri(url)
                .map_err(|e| Error::Other(format!("Invalid GitHub API URL {}: {}", url, e)))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::Auth(format!("Failed to create GitHub client: {}", e)))?;

        info!(owner = %owner, repo = %repo, "Created GitHub client");

        Ok(Self {
            client,
            owner,
            repo,
        })
    }

    /// Get the repository owner
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Get the repository name
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Get the underlying octocrab client
    pub fn client(&self) -> &Octocrab {
        &self.client
    }

    /// REST route for a pull request sub-resource
    pub(crate) fn pull_route(&self, pr_number: u64, rest: &str) -> String {
        format!(
            "/repos/{}/{}/pulls/{}/{}",
            self.owner, self.repo, pr_number, rest
        )
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}
