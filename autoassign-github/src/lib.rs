//! Auto-assign GitHub - GitHub integration for the reviewer automation
//!
//! This crate provides [`GitHubClient`], the octocrab-backed implementation of
//! [`autoassign_core::ReviewPlatform`].

mod client;
mod error;
mod review;

pub use client::GitHubClient;
pub use error::{Error, Result};
