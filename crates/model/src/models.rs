//! Fetched profile records for GitFolio

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Language name to byte count, as reported by the hosting API
pub type LanguageBreakdown = BTreeMap<String, u64>;

/// A user profile snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub public_repos: i64,
    pub followers: i64,
    pub following: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub avatar_url: String,
    pub html_url: String,
    /// Number of recent public events, bounded by the events page size
    #[serde(default)]
    pub recent_activity: i64,
}

impl UserRecord {
    /// Display name, falling back to the login
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.login)
    }
}

/// A repository as listed for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRepository {
    pub owner_login: String,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub url: String,
    pub stars: i64,
    pub forks: i64,
    pub open_issues: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub language: Option<String>,
    pub size_kb: i64,
    pub has_issues: bool,
    pub has_projects: bool,
    pub has_wiki: bool,
}

/// A single commit, newest first in any commit list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub sha: String,
    pub committed_at: DateTime<Utc>,
}
