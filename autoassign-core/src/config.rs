//! Configuration for reviewer automation
//!
//! Configuration is resolved with the following priority (highest to lowest):
//! 1. Action inputs (CLI flags, or the `INPUT_*` variables the CI runner sets)
//! 2. Config file (TOML, optional)
//! 3. Default values
//!
//! Inputs arrive as strings and are coerced exactly once, here, into [`Config`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{Error, Result};

/// Default number of reviewers a pull request should have
pub const DEFAULT_REVIEWER_COUNT: u32 = 1;

/// Typed reviewer assignment configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Candidate pool of reviewer handles
    pub reviewers: Vec<String>,

    /// Only assign reviewers to draft pull requests
    pub only_drafts: bool,

    /// Desired number of requested reviewers
    pub reviewer_count: u32,
}

impl Config {
    /// Create a config with the default gate and count for the given pool
    pub fn new(reviewers: Vec<String>) -> Self {
        Self {
            reviewers,
            only_drafts: true,
            reviewer_count: DEFAULT_REVIEWER_COUNT,
        }
    }

    /// Set the only-drafts gate
    pub fn with_only_drafts(mut self, only_drafts: bool) -> Self {
        self.only_drafts = only_drafts;
        self
    }

    /// Set the desired reviewer count
    pub fn with_reviewer_count(mut self, count: u32) -> Self {
        self.reviewer_count = count;
        self
    }

    /// Resolve the typed config from raw inputs layered over an optional file
    pub fn from_inputs(inputs: &RawInputs, file: Option<&FileConfig>) -> Result<Self> {
        let reviewers = match non_empty(inputs.reviewers.as_deref()) {
            Some(raw) => parse_reviewers(raw)?,
            None => file
                .and_then(|f| f.reviewers.clone())
                .map(clean_handles)
                .ok_or_else(|| {
                    Error::Config("input `reviewers` is required".to_string())
                })?,
        };

        let only_drafts = match non_empty(inputs.only_drafts.as_deref()) {
            Some(raw) => parse_only_drafts(raw),
            None => file.and_then(|f| f.only_drafts).unwrap_or(true),
        };

        let reviewer_count = match non_empty(inputs.reviewer_count.as_deref()) {
            Some(raw) => parse_reviewer_count(raw),
            None => file
                .and_then(|f| f.reviewer_count)
                .unwrap_or(DEFAULT_REVIEWER_COUNT),
        };

        Ok(Self {
            reviewers,
            only_drafts,
            reviewer_count,
        })
    }
}

/// Raw, string-typed action inputs as supplied by the invoking environment
#[derive(Clone, Default)]
pub struct RawInputs {
    /// JSON array of reviewer handles
    pub reviewers: Option<String>,
    /// Boolean-like string
    pub only_drafts: Option<String>,
    /// Integer-like string
    pub reviewer_count: Option<String>,
    /// Platform API credential
    pub github_token: Option<String>,
}

impl RawInputs {
    /// The API token, trimmed, if one was supplied
    pub fn token(&self) -> Option<&str> {
        non_empty(self.github_token.as_deref())
    }

    /// The API token, or a configuration error naming the missing input
    pub fn require_token(&self) -> Result<&str> {
        self.token()
            .ok_or_else(|| Error::Config("input `github-token` is required".to_string()))
    }
}

impl std::fmt::Debug for RawInputs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawInputs")
            .field("reviewers", &self.reviewers)
            .field("only_drafts", &self.only_drafts)
            .field("reviewer_count", &self.reviewer_count)
            .field(
                "github_token",
                &self.github_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Settings read from an optional TOML config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FileConfig {
    /// Candidate pool of reviewer handles
    pub reviewers: Option<Vec<String>>,
    /// Only assign reviewers to draft pull requests
    pub only_drafts: Option<bool>,
    /// Desired number of requested reviewers
    pub reviewer_count: Option<u32>,
}

impl FileConfig {
    /// Load settings from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents).map_err(|e| {
            Error::Config(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parse the `reviewers` input: a JSON array of strings
fn parse_reviewers(raw: &str) -> Result<Vec<String>> {
    let list: Vec<String> = serde_json::from_str(raw).map_err(|e| {
        Error::Config(format!(
            "input `reviewers` must be a JSON array of strings: {}",
            e
        ))
    })?;
    Ok(clean_handles(list))
}

fn clean_handles(list: Vec<String>) -> Vec<String> {
    list.into_iter()
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .collect()
}

/// Only the literal `false` disables the gate
fn parse_only_drafts(raw: &str) -> bool {
    !raw.trim().eq_ignore_ascii_case("false")
}

fn parse_reviewer_count(raw: &str) -> u32 {
    match raw.trim().parse::<u32>() {
        Ok(count) => count,
        Err(_) => {
            warn!(
                value = raw,
                default = DEFAULT_REVIEWER_COUNT,
                "Invalid reviewer-count, using default"
            );
            DEFAULT_REVIEWER_COUNT
        }
    }
}
