//! GitFolio Data Collectors
//!
//! Fetches profile, repository, README, language, commit and event data
//! from a code-hosting API.

pub mod github;
pub mod username;

use gitfolio_model::{CommitRecord, LanguageBreakdown, RawRepository, UserRecord};
use std::future::Future;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CollectorError>;

/// Default number of repositories fetched concurrently
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Default page size for commit and event listings
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// Configuration for collectors
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub github_token: Option<String>,
    pub api_base_url: String,
    pub user_agent: String,
    pub page_size: u32,
    pub max_concurrency: usize,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            github_token: std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()),
            api_base_url: std::env::var("GITHUB_API_BASE_URL")
                .unwrap_or_else(|_| "https://api.github.com".to_string()),
            user_agent: "GitFolio/0.1 (https://github.com/gitfolio/gitfolio)".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

/// Source of profile data for the analysis pipeline.
///
/// Only the profile and the repository list can fail. Per-repository and
/// per-user extras fall back to empty data so one bad repository never
/// fails a whole report.
pub trait ProfileSource: Send + Sync {
    fn user_profile(&self, username: &str) -> impl Future<Output = Result<UserRecord>> + Send;

    fn repositories(&self, username: &str)
        -> impl Future<Output = Result<Vec<RawRepository>>> + Send;

    /// README text, empty when absent or unreadable
    fn readme(&self, owner: &str, repo: &str) -> impl Future<Output = String> + Send;

    /// Language byte counts, empty on failure
    fn languages(&self, owner: &str, repo: &str) -> impl Future<Output = LanguageBreakdown> + Send;

    /// Recent commits, newest first, empty on failure
    fn commits(&self, owner: &str, repo: &str) -> impl Future<Output = Vec<CommitRecord>> + Send;

    /// Number of recent public events, 0 on failure
    fn recent_event_count(&self, username: &str) -> impl Future<Output = i64> + Send;

    /// How many repositories may be fetched at once
    fn max_concurrency(&self) -> usize {
        DEFAULT_MAX_CONCURRENCY
    }
}
