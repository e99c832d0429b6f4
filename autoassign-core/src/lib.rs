//! Auto-assign Core - reviewer automation for pull requests
//!
//! This crate holds the policy side of the automation: typed configuration,
//! event classification, the approval-dismissal and reviewer-selection rules,
//! and the runner that applies them through a [`ReviewPlatform`].

pub mod assign;
pub mod automation;
pub mod config;
pub mod error;
pub mod event;
pub mod platform;
pub mod review;
pub mod shuffle;

pub use assign::{plan_assignment, AssignmentDecision, SkipReason};
pub use automation::{Automation, Outcome};
pub use config::{Config, FileConfig, RawInputs};
pub use error::{Error, Result};
pub use event::{EventAction, PullRequest, PullRequestEvent};
pub use platform::{DryRun, ReviewPlatform};
pub use review::{DismissalPlan, Review, ReviewState};
pub use shuffle::{sample_distinct, shuffle, shuffle_with};
