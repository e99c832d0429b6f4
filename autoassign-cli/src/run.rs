//! Run command - handle one pull request event

use std::path::PathBuf;

use anyhow::Context;
use autoassign_core::event::is_pull_request_event;
use autoassign_core::{Automation, Config, FileConfig, Outcome, PullRequestEvent, RawInputs};
use autoassign_github::GitHubClient;
use clap::builder::FalseyValueParser;
use clap::{ArgAction, Args};

/// Action inputs, each falling back to the variable the CI runner sets
#[derive(Args)]
pub struct RunArgs {
    /// JSON array of candidate reviewer logins
    #[arg(long, env = "INPUT_REVIEWERS")]
    pub reviewers: Option<String>,

    /// Only assign reviewers to draft pull requests (anything but "false" is true)
    #[arg(long, env = "INPUT_ONLY-DRAFTS")]
    pub only_drafts: Option<String>,

    /// Desired number of requested reviewers
    #[arg(long, env = "INPUT_REVIEWER-COUNT")]
    pub reviewer_count: Option<String>,

    /// GitHub token used for API calls
    #[arg(long, env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Path to the event payload JSON
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: PathBuf,

    /// Name of the triggering workflow event
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    pub event_name: Option<String>,

    /// GitHub API base URL (for GitHub Enterprise Server)
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// Optional TOML file providing defaults for the inputs
    #[arg(long, env = "AUTO_ASSIGN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Read from GitHub but only log the changes that would be made
    #[arg(
        long,
        env = "AUTO_ASSIGN_DRY_RUN",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub dry_run: bool,
}

impl std::fmt::Debug for RunArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunArgs")
            .field("reviewers", &self.reviewers)
            .field("only_drafts", &self.only_drafts)
            .field("reviewer_count", &self.reviewer_count)
            .field(
                "github_token",
                &self.github_token.as_ref().map(|_| "<redacted>"),
            )
            .field("event_path", &self.event_path)
            .field("event_name", &self.event_name)
            .field("api_url", &self.api_url)
            .field("config", &self.config)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl RunArgs {
    /// Collect the raw inputs, falling back to `GITHUB_TOKEN` for the token
    pub fn raw_inputs(&self) -> RawInputs {
        let github_token = self
            .github_token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| std::env::var("GITHUB_TOKEN").ok());

        RawInputs {
            reviewers: self.reviewers.clone(),
            only_drafts: self.only_drafts.clone(),
            reviewer_count: self.reviewer_count.clone(),
            github_token,
        }
    }

    /// Execute the run command
    pub async fn execute(&self) -> anyhow::Result<Outcome> {
        let inputs = self.raw_inputs();

        let file = self
            .config
            .as_deref()
            .map(FileConfig::load_from_file)
            .transpose()?;
        let config = Config::from_inputs(&inputs, file.as_ref())?;
        let token = inputs.require_token()?;

        tracing::debug!(?inputs, ?config, "Configuration loaded");

        if let Some(name) = self.event_name.as_deref() {
            if !is_pull_request_event(name) {
                tracing::warn!(event = name, "Not a pull request event, processing payload anyway");
            }
        }

        let event = PullRequestEvent::load_from_file(&self.event_path)?;
        let pr = &event.pull_request;

        let client = GitHubClient::new(token, pr.owner(), pr.repo(), self.api_url.as_deref())
            .context("Failed to set up GitHub client")?;

        let outcome = if self.dry_run {
            tracing::info!("Dry run: no reviews will be dismissed or requested");
            Automation::new(autoassign_core::DryRun::new(client), config)
                .run(&event)
                .await?
        } else {
            Automation::new(client, config).run(&event).await?
        };

        Ok(outcome)
    }
}
