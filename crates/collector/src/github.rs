//! GitHub API collector

use crate::{CollectorConfig, CollectorError, ProfileSource, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use gitfolio_model::{CommitRecord, LanguageBreakdown, RawRepository, UserRecord};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

/// GitHub API client
pub struct GithubCollector {
    client: Client,
    config: CollectorConfig,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    login: String,
    name: Option<String>,
    bio: Option<String>,
    #[serde(default)]
    public_repos: i64,
    #[serde(default)]
    followers: i64,
    #[serde(default)]
    following: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    avatar_url: String,
    #[serde(default)]
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct OwnerResponse {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RepoResponse {
    name: String,
    full_name: String,
    owner: OwnerResponse,
    description: Option<String>,
    html_url: String,
    stargazers_count: i64,
    forks_count: i64,
    open_issues_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    language: Option<String>,
    #[serde(default)]
    size: i64,
    #[serde(default)]
    has_issues: bool,
    #[serde(default)]
    has_projects: bool,
    #[serde(default)]
    has_wiki: bool,
}

impl From<RepoResponse> for RawRepository {
    fn from(repo: RepoResponse) -> Self {
        Self {
            owner_login: repo.owner.login,
            name: repo.name,
            full_name: repo.full_name,
            description: repo.description,
            url: repo.html_url,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            open_issues: repo.open_issues_count,
            created_at: repo.created_at,
            updated_at: repo.updated_at,
            language: repo.language,
            size_kb: repo.size,
            has_issues: repo.has_issues,
            has_projects: repo.has_projects,
            has_wiki: repo.has_wiki,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ReadmeResponse {
    content: String,
    #[serde(default)]
    encoding: String,
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    sha: String,
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    committer: Option<Signature>,
    author: Option<Signature>,
}

#[derive(Debug, Deserialize)]
struct Signature {
    date: Option<DateTime<Utc>>,
}

impl CommitResponse {
    fn into_record(self) -> Option<CommitRecord> {
        let committed_at = self
            .commit
            .committer
            .and_then(|s| s.date)
            .or_else(|| self.commit.author.and_then(|s| s.date))?;

        Some(CommitRecord {
            sha: self.sha,
            committed_at,
        })
    }
}

impl GithubCollector {
    /// Create a new GitHub collector
    pub fn new(config: CollectorConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| CollectorError::Config(format!("user agent: {}", e)))?,
        );

        if let Some(ref token) = config.github_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| CollectorError::Config(format!("token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self { client, config })
    }

    /// Whether requests are sent with a token
    pub fn is_authenticated(&self) -> bool {
        self.config.github_token.is_some()
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.config.api_base_url.trim_end_matches('/'), path);

        let response = self.client.get(&url).query(query).send().await?;
        self.check_rate_limit(&response)?;

        Ok(response)
    }

    async fn fetch_user(&self, username: &str) -> Result<UserRecord> {
        let response = self.get(&format!("/users/{}", username), &[]).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CollectorError::NotFound(username.to_string()));
        }
        if !response.status().is_success() {
            return Err(CollectorError::Api(format!(
                "GitHub API error: {} for user {}",
                response.status(),
                username
            )));
        }

        let user: UserResponse = response.json().await?;
        Ok(UserRecord {
            login: user.login,
            name: user.name,
            bio: user.bio,
            public_repos: user.public_repos,
            followers: user.followers,
            following: user.following,
            created_at: user.created_at,
            updated_at: user.updated_at,
            avatar_url: user.avatar_url,
            html_url: user.html_url,
            recent_activity: 0,
        })
    }

    async fn fetch_repositories(&self, username: &str) -> Result<Vec<RawRepository>> {
        let query = [("sort", "updated".to_string()), ("per_page", "100".to_string())];
        let response = self.get(&format!("/users/{}/repos", username), &query).await?;

        match response.status() {
            StatusCode::NO_CONTENT => return Ok(Vec::new()),
            StatusCode::NOT_FOUND => return Err(CollectorError::NotFound(username.to_string())),
            status if !status.is_success() => {
                return Err(CollectorError::Api(format!(
                    "GitHub API error: {} listing repositories for {}",
                    status, username
                )))
            }
            _ => {}
        }

        let repos: Vec<RepoResponse> = response.json().await?;
        debug!(username = username, count = repos.len(), "Fetched repositories");
        Ok(repos.into_iter().map(RawRepository::from).collect())
    }

    async fn fetch_readme(&self, owner: &str, repo: &str) -> Result<String> {
        let response = self.get(&format!("/repos/{}/{}/readme", owner, repo), &[]).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(String::new());
        }
        if !response.status().is_success() {
            return Err(CollectorError::Api(format!("README request returned {}", response.status())));
        }

        let readme: ReadmeResponse = response.json().await?;
        decode_readme(&readme)
    }

    async fn fetch_languages(&self, owner: &str, repo: &str) -> Result<LanguageBreakdown> {
        let response = self.get(&format!("/repos/{}/{}/languages", owner, repo), &[]).await?;

        if !response.status().is_success() {
            return Err(CollectorError::Api(format!("languages request returned {}", response.status())));
        }

        Ok(response.json().await?)
    }

    async fn fetch_commits(&self, owner: &str, repo: &str) -> Result<Vec<CommitRecord>> {
        let query = [("per_page", self.config.page_size.to_string())];
        let response = self.get(&format!("/repos/{}/{}/commits", owner, repo), &query).await?;

        // Empty repositories answer 409 Conflict
        if !response.status().is_success() {
            return Err(CollectorError::Api(format!("commits request returned {}", response.status())));
        }

        let commits: Vec<CommitResponse> = response.json().await?;
        Ok(commits.into_iter().filter_map(CommitResponse::into_record).collect())
    }

    async fn fetch_event_count(&self, username: &str) -> Result<i64> {
        let query = [("per_page", self.config.page_size.to_string())];
        let response = self.get(&format!("/users/{}/events", username), &query).await?;

        if !response.status().is_success() {
            return Err(CollectorError::Api(format!("events request returned {}", response.status())));
        }

        let events: Vec<serde_json::Value> = response.json().await?;
        Ok(events.len() as i64)
    }

    fn check_rate_limit(&self, response: &reqwest::Response) -> Result<()> {
        let status = response.status();
        if status != StatusCode::FORBIDDEN && status != StatusCode::TOO_MANY_REQUESTS {
            return Ok(());
        }

        let exhausted = response
            .headers()
            .get("x-ratelimit-remaining")
            .is_some_and(|remaining| remaining == "0");

        if status == StatusCode::TOO_MANY_REQUESTS || exhausted {
            let reset = response
                .headers()
                .get("x-ratelimit-reset")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());

            let wait = match reset {
                Some(reset) => reset.saturating_sub(Utc::now().timestamp().max(0) as u64),
                None => 60,
            };

            return Err(CollectorError::RateLimited(wait));
        }

        Ok(())
    }
}

fn decode_readme(readme: &ReadmeResponse) -> Result<String> {
    if !readme.encoding.is_empty() && readme.encoding != "base64" {
        return Err(CollectorError::Api(format!("unsupported README encoding {}", readme.encoding)));
    }

    let compact: String = readme.content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| CollectorError::Api(format!("README is not valid base64: {}", e)))?;

    String::from_utf8(bytes).map_err(|e| CollectorError::Api(format!("README is not UTF-8: {}", e)))
}

impl ProfileSource for GithubCollector {
    async fn user_profile(&self, username: &str) -> Result<UserRecord> {
        self.fetch_user(username).await
    }

    async fn repositories(&self, username: &str) -> Result<Vec<RawRepository>> {
        self.fetch_repositories(username).await
    }

    async fn readme(&self, owner: &str, repo: &str) -> String {
        self.fetch_readme(owner, repo).await.unwrap_or_else(|e| {
            debug!(owner = owner, repo = repo, error = %e, "README unavailable");
            String::new()
        })
    }

    async fn languages(&self, owner: &str, repo: &str) -> LanguageBreakdown {
        self.fetch_languages(owner, repo).await.unwrap_or_else(|e| {
            warn!(owner = owner, repo = repo, error = %e, "Failed to fetch languages");
            LanguageBreakdown::new()
        })
    }

    async fn commits(&self, owner: &str, repo: &str) -> Vec<CommitRecord> {
        self.fetch_commits(owner, repo).await.unwrap_or_else(|e| {
            debug!(owner = owner, repo = repo, error = %e, "Commits unavailable");
            Vec::new()
        })
    }

    async fn recent_event_count(&self, username: &str) -> i64 {
        self.fetch_event_count(username).await.unwrap_or_else(|e| {
            warn!(username = username, error = %e, "Failed to fetch events");
            0
        })
    }

    fn max_concurrency(&self) -> usize {
        self.config.max_concurrency.max(1)
    }
}
