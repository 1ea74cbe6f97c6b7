//! Per-repository analysis
//!
//! Turns one fetched repository plus its README, language breakdown and
//! recent commits into documentation, structure and activity facts, a
//! weighted score and short strength/weakness lists.

use crate::config::ScoringConfig;
use crate::score::{clamp_score, popularity, round2, Grade};
use chrono::{DateTime, Utc};
use gitfolio_model::{CommitRecord, LanguageBreakdown, RawRepository};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

pub const DOCUMENTATION_WEIGHT: f64 = 0.35;
pub const CODE_QUALITY_WEIGHT: f64 = 0.25;
pub const ACTIVITY_WEIGHT: f64 = 0.25;
pub const POPULARITY_WEIGHT: f64 = 0.15;

pub const CODE_QUALITY_BASE: f64 = 50.0;
pub const MULTI_LANGUAGE_BONUS: f64 = 20.0;
pub const WIKI_BONUS: f64 = 15.0;

/// Commits counted towards the activity volume bonus
const COMMIT_VOLUME_CAP: usize = 30;
const LOW_COMMIT_COUNT: usize = 5;
const POPULAR_STARS: i64 = 10;
const EXCELLENT_DOCS: u32 = 70;
const MAX_HIGHLIGHTS: usize = 3;

static SETUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)install|setup|getting started").expect("valid regex"));
static USAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)example|usage|demo").expect("valid regex"));
static BADGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[.*\]\(.*\)").expect("valid regex"));
static API_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)api|endpoint|route").expect("valid regex"));

/// README quality facts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentationAnalysis {
    pub has_readme: bool,
    pub readme_length: usize,
    pub has_setup_instructions: bool,
    pub has_examples: bool,
    pub has_badges: bool,
    pub has_api_documentation: bool,
    pub quality_score: u32,
}

impl DocumentationAnalysis {
    pub fn from_readme(readme: &str) -> Self {
        if readme.is_empty() {
            return Self {
                has_readme: false,
                readme_length: 0,
                has_setup_instructions: false,
                has_examples: false,
                has_badges: false,
                has_api_documentation: false,
                quality_score: 0,
            };
        }

        let readme_length = readme.chars().count();
        let has_setup_instructions = SETUP_RE.is_match(readme);
        let has_examples = USAGE_RE.is_match(readme);
        let has_badges = BADGE_RE.is_match(readme);
        let has_api_documentation = API_RE.is_match(readme);

        let mut score = match readme_length {
            501.. => 30,
            201..=500 => 15,
            _ => 0,
        };
        if has_setup_instructions {
            score += 20;
        }
        if has_examples {
            score += 20;
        }
        if has_badges {
            score += 15;
        }
        if has_api_documentation {
            score += 15;
        }

        Self {
            has_readme: true,
            readme_length,
            has_setup_instructions,
            has_examples,
            has_badges,
            has_api_documentation,
            quality_score: score.min(100),
        }
    }
}

/// Language and project-feature facts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeStructureAnalysis {
    pub primary_language: Option<String>,
    pub languages_used: Vec<String>,
    pub language_diversity: usize,
    pub has_multiple_languages: bool,
    pub size_kb: i64,
    pub has_issues_enabled: bool,
    pub has_projects_enabled: bool,
    pub has_wiki_enabled: bool,
}

impl CodeStructureAnalysis {
    pub fn new(repository: &RawRepository, languages: &LanguageBreakdown) -> Self {
        // Largest first; the map iterates alphabetically so ties stay alphabetical
        let mut by_bytes: Vec<(&String, u64)> = languages.iter().map(|(l, &b)| (l, b)).collect();
        by_bytes.sort_by(|a, b| b.1.cmp(&a.1));

        Self {
            primary_language: repository.language.clone(),
            languages_used: by_bytes.into_iter().map(|(l, _)| l.clone()).collect(),
            language_diversity: languages.len(),
            has_multiple_languages: languages.len() > 1,
            size_kb: repository.size_kb,
            has_issues_enabled: repository.has_issues,
            has_projects_enabled: repository.has_projects,
            has_wiki_enabled: repository.has_wiki,
        }
    }

    /// Base score plus bonuses for multiple languages and an enabled wiki
    pub fn code_quality_score(&self) -> f64 {
        let mut score = CODE_QUALITY_BASE;
        if self.has_multiple_languages {
            score += MULTI_LANGUAGE_BONUS;
        }
        if self.has_wiki_enabled {
            score += WIKI_BONUS;
        }
        clamp_score(score)
    }
}

/// Commit recency and frequency facts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityAnalysis {
    pub total_commits_recent: usize,
    /// Commits per day over the observed span
    pub commit_frequency: f64,
    pub last_commit_date: Option<DateTime<Utc>>,
    pub days_since_last_commit: Option<i64>,
    pub is_active: bool,
    pub activity_score: u32,
}

impl ActivityAnalysis {
    pub fn from_commits(commits: &[CommitRecord], now: DateTime<Utc>, active_days_threshold: i64) -> Self {
        let (Some(newest), Some(oldest)) = (
            commits.iter().map(|c| c.committed_at).max(),
            commits.iter().map(|c| c.committed_at).min(),
        ) else {
            return Self {
                total_commits_recent: 0,
                commit_frequency: 0.0,
                last_commit_date: None,
                days_since_last_commit: None,
                is_active: false,
                activity_score: 0,
            };
        };

        let count = commits.len();
        let span_days = (newest - oldest).num_days();
        let commit_frequency = if count == 1 {
            1.0
        } else if span_days > 0 {
            count as f64 / span_days as f64
        } else {
            count as f64
        };

        let days_since_last_commit = (now - newest).num_days();
        let is_active = days_since_last_commit < active_days_threshold;

        let mut score = 0;
        if is_active {
            score += 40;
        }
        if commit_frequency > 0.5 {
            score += 30;
        } else if commit_frequency > 0.1 {
            score += 15;
        }
        score += count.min(COMMIT_VOLUME_CAP) as u32;

        Self {
            total_commits_recent: count,
            commit_frequency: round2(commit_frequency),
            last_commit_date: Some(newest),
            days_since_last_commit: Some(days_since_last_commit),
            is_active,
            activity_score: score.min(100),
        }
    }
}

/// Weighted score of a single repository
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryScore {
    pub overall: f64,
    pub documentation: f64,
    pub code_quality: f64,
    pub activity: f64,
    pub popularity: f64,
    pub grade: Grade,
}

impl RepositoryScore {
    fn calculate(
        documentation: &DocumentationAnalysis,
        code: &CodeStructureAnalysis,
        activity: &ActivityAnalysis,
        repository: &RawRepository,
    ) -> Self {
        let documentation = clamp_score(f64::from(documentation.quality_score));
        let code_quality = code.code_quality_score();
        let activity = clamp_score(f64::from(activity.activity_score));
        let popularity = popularity(repository.stars, repository.forks);

        let overall = round2(clamp_score(
            documentation * DOCUMENTATION_WEIGHT
                + code_quality * CODE_QUALITY_WEIGHT
                + activity * ACTIVITY_WEIGHT
                + popularity * POPULARITY_WEIGHT,
        ));

        Self {
            overall,
            documentation,
            code_quality,
            activity,
            popularity,
            grade: Grade::from_score(overall),
        }
    }
}

/// A repository together with everything derived from it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzedRepository {
    #[serde(flatten)]
    pub repository: RawRepository,
    pub languages: LanguageBreakdown,
    pub documentation_analysis: DocumentationAnalysis,
    pub code_analysis: CodeStructureAnalysis,
    pub activity_analysis: ActivityAnalysis,
    pub score: RepositoryScore,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

impl AnalyzedRepository {
    pub fn name(&self) -> &str {
        &self.repository.name
    }

    /// Language with the most bytes; ties go to the alphabetically first
    pub fn dominant_language(&self) -> Option<&str> {
        self.languages
            .iter()
            .fold(None::<(&String, u64)>, |best, (name, &bytes)| match best {
                Some((_, most)) if most >= bytes => best,
                _ => Some((name, bytes)),
            })
            .map(|(name, _)| name.as_str())
    }
}

/// Analyzes single repositories
#[derive(Debug, Clone)]
pub struct RepositoryAnalyzer {
    active_days_threshold: i64,
    good_readme_length: usize,
}

impl RepositoryAnalyzer {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            active_days_threshold: config.active_days_threshold,
            good_readme_length: config.good_readme_length,
        }
    }

    /// Analyze one repository as of `now`
    pub fn analyze(
        &self,
        repository: RawRepository,
        readme: &str,
        languages: LanguageBreakdown,
        commits: &[CommitRecord],
        now: DateTime<Utc>,
    ) -> AnalyzedRepository {
        let documentation_analysis = DocumentationAnalysis::from_readme(readme);
        let code_analysis = CodeStructureAnalysis::new(&repository, &languages);
        let activity_analysis =
            ActivityAnalysis::from_commits(commits, now, self.active_days_threshold);

        let score = RepositoryScore::calculate(
            &documentation_analysis,
            &code_analysis,
            &activity_analysis,
            &repository,
        );
        let strengths = strengths(&repository, &documentation_analysis, &activity_analysis);
        let weaknesses = self.weaknesses(&documentation_analysis, &activity_analysis);

        AnalyzedRepository {
            repository,
            languages,
            documentation_analysis,
            code_analysis,
            activity_analysis,
            score,
            strengths,
            weaknesses,
        }
    }

    fn weaknesses(&self, docs: &DocumentationAnalysis, activity: &ActivityAnalysis) -> Vec<String> {
        let mut weaknesses = Vec::new();

        if !docs.has_readme {
            weaknesses.push("Missing README".to_string());
        } else if docs.readme_length < self.good_readme_length {
            weaknesses.push("README too brief".to_string());
        }
        if !docs.has_setup_instructions {
            weaknesses.push("No setup instructions".to_string());
        }
        if !activity.is_active {
            weaknesses.push("Inactive repository".to_string());
        }
        if activity.total_commits_recent < LOW_COMMIT_COUNT {
            weaknesses.push("Low commit activity".to_string());
        }

        weaknesses.truncate(MAX_HIGHLIGHTS);
        weaknesses
    }
}

fn strengths(
    repository: &RawRepository,
    docs: &DocumentationAnalysis,
    activity: &ActivityAnalysis,
) -> Vec<String> {
    let mut strengths = Vec::new();

    if docs.quality_score > EXCELLENT_DOCS {
        strengths.push("Excellent documentation".to_string());
    } else if docs.has_readme {
        strengths.push("Has README".to_string());
    }
    if repository.stars > POPULAR_STARS {
        strengths.push(format!("Popular ({} stars)", repository.stars));
    }
    if activity.is_active {
        strengths.push("Actively maintained".to_string());
    }
    if let Some(ref language) = repository.language {
        strengths.push(format!("Built with {}", language));
    }

    strengths.truncate(MAX_HIGHLIGHTS);
    strengths
}
