//! Shared fixtures for unit tests

use crate::portfolio::{ComponentScores, PortfolioScore};
use crate::repository::{
    ActivityAnalysis, AnalyzedRepository, CodeStructureAnalysis, DocumentationAnalysis,
    RepositoryScore,
};
use crate::score::Grade;
use chrono::{DateTime, Duration, TimeZone, Utc};
use gitfolio_model::{CommitRecord, LanguageBreakdown, RawRepository, UserRecord};

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

/// Commits made the given number of days before `now()`
pub fn commits_at(days_ago: &[i64]) -> Vec<CommitRecord> {
    days_ago
        .iter()
        .enumerate()
        .map(|(i, days)| CommitRecord {
            sha: format!("{:040x}", i),
            committed_at: now() - Duration::days(*days),
        })
        .collect()
}

pub fn raw_repo(name: &str) -> RawRepository {
    RawRepository {
        owner_login: "octocat".to_string(),
        name: name.to_string(),
        full_name: format!("octocat/{}", name),
        description: None,
        url: format!("https://github.com/octocat/{}", name),
        stars: 0,
        forks: 0,
        open_issues: 0,
        created_at: now() - Duration::days(400),
        updated_at: now() - Duration::days(3),
        language: Some("Rust".to_string()),
        size_kb: 128,
        has_issues: true,
        has_projects: false,
        has_wiki: false,
    }
}

pub fn user(login: &str) -> UserRecord {
    UserRecord {
        login: login.to_string(),
        name: None,
        bio: None,
        public_repos: 0,
        followers: 0,
        following: 0,
        created_at: now() - Duration::days(1000),
        updated_at: now() - Duration::days(1),
        avatar_url: String::new(),
        html_url: format!("https://github.com/{}", login),
        recent_activity: 0,
    }
}

/// An analyzed repository with hand-picked facts
pub fn analyzed_repo(name: &str, doc_score: u32, is_active: bool, languages: &[&str]) -> AnalyzedRepository {
    let repository = raw_repo(name);
    let languages: LanguageBreakdown = languages
        .iter()
        .enumerate()
        .map(|(i, lang)| (lang.to_string(), 1000 - i as u64))
        .collect();

    let has_readme = doc_score > 0;
    let documentation_analysis = DocumentationAnalysis {
        has_readme,
        readme_length: if has_readme { 600 } else { 0 },
        has_setup_instructions: doc_score >= 50,
        has_examples: doc_score >= 70,
        has_badges: false,
        has_api_documentation: false,
        quality_score: doc_score,
    };
    let code_analysis = CodeStructureAnalysis::new(&repository, &languages);
    let activity_analysis = ActivityAnalysis {
        total_commits_recent: if is_active { 12 } else { 0 },
        commit_frequency: if is_active { 0.8 } else { 0.0 },
        last_commit_date: is_active.then(|| now() - Duration::days(2)),
        days_since_last_commit: is_active.then_some(2),
        is_active,
        activity_score: if is_active { 82 } else { 0 },
    };
    let overall = f64::from(doc_score) * 0.5 + if is_active { 40.0 } else { 0.0 };
    let score = RepositoryScore {
        overall,
        documentation: f64::from(doc_score),
        code_quality: code_analysis.code_quality_score(),
        activity: f64::from(activity_analysis.activity_score),
        popularity: 0.0,
        grade: Grade::from_score(overall),
    };

    AnalyzedRepository {
        repository,
        languages,
        documentation_analysis,
        code_analysis,
        activity_analysis,
        score,
        strengths: Vec::new(),
        weaknesses: Vec::new(),
    }
}

pub fn portfolio_score(overall: f64, components: ComponentScores, red_flags: &[&str]) -> PortfolioScore {
    PortfolioScore {
        overall,
        components,
        grade: Grade::from_score(overall),
        red_flags: red_flags.iter().map(|f| f.to_string()).collect(),
        strengths: Vec::new(),
    }
}
