//! End-to-end profile analysis: fetch, analyze, score, review, plan

use crate::clock::{Clock, SystemClock};
use crate::config::ScoringConfig;
use crate::portfolio::{PortfolioScore, PortfolioScorer};
use crate::recruiter::{self, RecruiterFeedback};
use crate::repository::{AnalyzedRepository, RepositoryAnalyzer};
use crate::roadmap::{self, Roadmap};
use crate::Result;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use gitfolio_collector::ProfileSource;
use gitfolio_model::{RawRepository, UserRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

/// Complete analysis of one profile
#[derive(Debug, Clone, Serialize)]
pub struct ProfileReport {
    pub username: String,
    pub user_data: UserRecord,
    pub repositories: Vec<AnalyzedRepository>,
    pub score: PortfolioScore,
    pub recruiter_feedback: RecruiterFeedback,
    pub roadmap: Roadmap,
    pub analyzed_at: DateTime<Utc>,
}

/// Runs the analysis pipeline against a profile source
pub struct ProfileAnalyzer<S, C = SystemClock> {
    source: S,
    config: ScoringConfig,
    clock: C,
}

impl<S: ProfileSource> ProfileAnalyzer<S, SystemClock> {
    pub fn new(source: S, config: ScoringConfig) -> Result<Self> {
        Self::with_clock(source, config, SystemClock)
    }
}

impl<S: ProfileSource, C: Clock> ProfileAnalyzer<S, C> {
    /// Create an analyzer; the config is validated here and never again
    pub fn with_clock(source: S, config: ScoringConfig, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self { source, config, clock })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Profile record including the recent event count
    pub async fn basic_profile(&self, username: &str) -> Result<UserRecord> {
        let (user, recent_activity) = futures::join!(
            self.source.user_profile(username),
            self.source.recent_event_count(username)
        );

        Ok(UserRecord {
            recent_activity,
            ..user?
        })
    }

    /// Analyze a profile with a freshly seeded persona draw
    pub async fn analyze(&self, username: &str) -> Result<ProfileReport> {
        let mut rng = StdRng::from_os_rng();
        self.analyze_with_rng(username, &mut rng).await
    }

    pub async fn analyze_with_rng<R: Rng + Send>(
        &self,
        username: &str,
        rng: &mut R,
    ) -> Result<ProfileReport> {
        info!(username = username, "Analyzing profile");

        let (user, repositories) =
            futures::join!(self.basic_profile(username), self.source.repositories(username));
        let user = user?;
        let mut repositories = repositories?;

        if repositories.len() > self.config.max_repos {
            debug!(
                username = username,
                total = repositories.len(),
                kept = self.config.max_repos,
                "Truncating repository list"
            );
            repositories.truncate(self.config.max_repos);
        }

        let now = self.clock.now();
        let analyzed = self.analyze_repositories(repositories, now).await;
        let report = self.compose_report(username, user, analyzed, now, rng);

        info!(
            username = username,
            repos = report.repositories.len(),
            overall = report.score.overall,
            grade = %report.score.grade,
            "Profile analyzed"
        );
        Ok(report)
    }

    /// Fetch and analyze repositories concurrently, keeping their order
    async fn analyze_repositories(
        &self,
        repositories: Vec<RawRepository>,
        now: DateTime<Utc>,
    ) -> Vec<AnalyzedRepository> {
        let analyzer = RepositoryAnalyzer::new(&self.config);
        let tasks: Vec<_> = repositories
            .into_iter()
            .map(|repo| self.analyze_repository(&analyzer, repo, now))
            .collect();

        stream::iter(tasks)
            .buffered(self.source.max_concurrency().max(1))
            .collect()
            .await
    }

    async fn analyze_repository(
        &self,
        analyzer: &RepositoryAnalyzer,
        repo: RawRepository,
        now: DateTime<Utc>,
    ) -> AnalyzedRepository {
        let (readme, languages, commits) = futures::join!(
            self.source.readme(&repo.owner_login, &repo.name),
            self.source.languages(&repo.owner_login, &repo.name),
            self.source.commits(&repo.owner_login, &repo.name)
        );

        debug!(
            repo = %repo.full_name,
            readme_len = readme.len(),
            languages = languages.len(),
            commits = commits.len(),
            "Fetched repository details"
        );
        analyzer.analyze(repo, &readme, languages, &commits, now)
    }

    /// Score and narrate already-analyzed repositories
    pub fn compose_report<R: Rng>(
        &self,
        username: &str,
        user: UserRecord,
        repositories: Vec<AnalyzedRepository>,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> ProfileReport {
        let score = PortfolioScorer::new(self.config.weights).calculate(&user, &repositories);
        let recruiter_feedback = recruiter::review(&user, &repositories, &score, rng);
        let roadmap = roadmap::generate(&score, &repositories, now);

        ProfileReport {
            username: username.to_string(),
            user_data: user,
            repositories,
            score,
            recruiter_feedback,
            roadmap,
            analyzed_at: now,
        }
    }
}
