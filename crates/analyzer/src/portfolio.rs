//! Portfolio-wide scoring

use crate::config::ScoringWeights;
use crate::repository::AnalyzedRepository;
use crate::score::{clamp_score, popularity, round2, Grade};
use gitfolio_model::UserRecord;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

pub const NO_REPOSITORIES: &str = "No public repositories";
pub const ALL_INACTIVE: &str = "All repositories are inactive";
pub const MOST_MISSING_README: &str = "Most repositories missing README files";
pub const NO_STARS: &str = "No stars on any repositories";

/// Recent events beyond this count earn no extra consistency
const RECENT_ACTIVITY_CAP: i64 = 50;
const WELL_DOCUMENTED: u32 = 70;
const MAX_STRENGTHS: usize = 3;

/// The five portfolio components, in tie-breaking order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Documentation,
    CodeQuality,
    Consistency,
    Impact,
    Depth,
}

impl Component {
    pub const ALL: [Component; 5] = [
        Component::Documentation,
        Component::CodeQuality,
        Component::Consistency,
        Component::Impact,
        Component::Depth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Component::Documentation => "documentation",
            Component::CodeQuality => "code_quality",
            Component::Consistency => "consistency",
            Component::Impact => "impact",
            Component::Depth => "depth",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ComponentScores {
    pub documentation: f64,
    pub code_quality: f64,
    pub consistency: f64,
    pub impact: f64,
    pub depth: f64,
}

impl ComponentScores {
    pub fn get(&self, component: Component) -> f64 {
        match component {
            Component::Documentation => self.documentation,
            Component::CodeQuality => self.code_quality,
            Component::Consistency => self.consistency,
            Component::Impact => self.impact,
            Component::Depth => self.depth,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Component, f64)> + '_ {
        Component::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Lowest-scoring component; ties go to the earlier one
    pub fn weakest(&self) -> Component {
        self.iter()
            .fold((Component::Documentation, f64::INFINITY), |lowest, (c, score)| {
                if score < lowest.1 {
                    (c, score)
                } else {
                    lowest
                }
            })
            .0
    }

    fn rounded(&self) -> Self {
        Self {
            documentation: round2(self.documentation),
            code_quality: round2(self.code_quality),
            consistency: round2(self.consistency),
            impact: round2(self.impact),
            depth: round2(self.depth),
        }
    }

    fn weighted(&self, weights: &ScoringWeights) -> f64 {
        self.documentation * weights.documentation
            + self.code_quality * weights.code_quality
            + self.consistency * weights.consistency
            + self.impact * weights.impact
            + self.depth * weights.depth
    }
}

/// Overall portfolio evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioScore {
    pub overall: f64,
    pub components: ComponentScores,
    pub grade: Grade,
    pub red_flags: Vec<String>,
    pub strengths: Vec<String>,
}

impl PortfolioScore {
    pub fn has_red_flag(&self, flag: &str) -> bool {
        self.red_flags.iter().any(|f| f == flag)
    }
}

/// Portfolio score calculator
#[derive(Debug, Clone)]
pub struct PortfolioScorer {
    weights: ScoringWeights,
}

impl PortfolioScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn calculate(&self, user: &UserRecord, repos: &[AnalyzedRepository]) -> PortfolioScore {
        let exact = ComponentScores {
            documentation: documentation_score(repos),
            code_quality: code_quality_score(repos),
            consistency: consistency_score(repos, user),
            impact: impact_score(repos),
            depth: depth_score(repos),
        };

        // Weighted from unrounded components, rounded once
        let overall = round2(clamp_score(exact.weighted(&self.weights)));
        let components = exact.rounded();
        debug!(
            login = %user.login,
            repos = repos.len(),
            overall = overall,
            "Calculated portfolio score"
        );

        PortfolioScore {
            overall,
            components,
            grade: Grade::from_score(overall),
            red_flags: red_flags(repos),
            strengths: strengths(repos),
        }
    }
}

fn mean(repos: &[AnalyzedRepository], value: impl Fn(&AnalyzedRepository) -> f64) -> f64 {
    if repos.is_empty() {
        return 0.0;
    }
    repos.iter().map(|r| clamp_score(value(r))).sum::<f64>() / repos.len() as f64
}

fn documentation_score(repos: &[AnalyzedRepository]) -> f64 {
    mean(repos, |r| f64::from(r.documentation_analysis.quality_score))
}

fn code_quality_score(repos: &[AnalyzedRepository]) -> f64 {
    mean(repos, |r| r.score.code_quality)
}

fn consistency_score(repos: &[AnalyzedRepository], user: &UserRecord) -> f64 {
    if repos.is_empty() {
        return 0.0;
    }

    let active = repos.iter().filter(|r| r.activity_analysis.is_active).count();
    let active_ratio = active as f64 / repos.len() as f64;
    let recent = user.recent_activity.clamp(0, RECENT_ACTIVITY_CAP) as f64;
    let activity_bonus = recent / RECENT_ACTIVITY_CAP as f64 * 20.0;

    clamp_score(active_ratio * 80.0 + activity_bonus)
}

fn impact_score(repos: &[AnalyzedRepository]) -> f64 {
    if repos.is_empty() {
        return 0.0;
    }

    let stars = repos.iter().map(|r| r.repository.stars.max(0)).fold(0i64, i64::saturating_add);
    let forks = repos.iter().map(|r| r.repository.forks.max(0)).fold(0i64, i64::saturating_add);
    popularity(stars, forks)
}

fn distinct_languages(repos: &[AnalyzedRepository]) -> usize {
    repos
        .iter()
        .flat_map(|r| r.languages.keys())
        .collect::<BTreeSet<_>>()
        .len()
}

fn depth_score(repos: &[AnalyzedRepository]) -> f64 {
    if repos.is_empty() {
        return 0.0;
    }

    match distinct_languages(repos) {
        5.. => 100.0,
        3..=4 => 80.0,
        2 => 60.0,
        1 => 40.0,
        0 => 20.0,
    }
}

fn red_flags(repos: &[AnalyzedRepository]) -> Vec<String> {
    if repos.is_empty() {
        return vec![NO_REPOSITORIES.to_string()];
    }

    let mut flags = Vec::new();

    if repos.iter().all(|r| !r.activity_analysis.is_active) {
        flags.push(ALL_INACTIVE.to_string());
    }

    let missing_readme = repos.iter().filter(|r| !r.documentation_analysis.has_readme).count();
    if missing_readme * 2 > repos.len() {
        flags.push(MOST_MISSING_README.to_string());
    }

    if repos.iter().all(|r| r.repository.stars <= 0) {
        flags.push(NO_STARS.to_string());
    }

    flags
}

fn strengths(repos: &[AnalyzedRepository]) -> Vec<String> {
    let mut strengths = Vec::new();

    if repos.len() >= 5 {
        strengths.push(format!("Strong portfolio with {} repositories", repos.len()));
    }

    let well_documented = repos
        .iter()
        .filter(|r| r.documentation_analysis.quality_score > WELL_DOCUMENTED)
        .count();
    if well_documented >= 3 {
        strengths.push("Multiple well-documented projects".to_string());
    }

    let languages = distinct_languages(repos);
    if languages >= 3 {
        strengths.push(format!(
            "Demonstrates proficiency in {} programming languages",
            languages
        ));
    }

    strengths.truncate(MAX_STRENGTHS);
    strengths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{analyzed_repo, user};

    fn scorer() -> PortfolioScorer {
        PortfolioScorer::new(ScoringWeights::default())
    }

    #[test]
    fn empty_portfolio_scores_zero() {
        let score = scorer().calculate(&user("nobody"), &[]);

        assert_eq!(score.overall, 0.0);
        assert_eq!(score.components, ComponentScores::default());
        assert_eq!(score.grade, Grade::F);
        assert_eq!(score.red_flags, vec![NO_REPOSITORIES]);
        assert!(score.strengths.is_empty());
    }

    #[test]
    fn five_active_starless_repositories() {
        let repos: Vec<_> = (0..5)
            .map(|i| {
                let langs: &[&str] = if i % 2 == 0 { &["Rust"] } else { &["Rust", "Python"] };
                analyzed_repo(&format!("repo-{}", i), 80, true, langs)
            })
            .collect();

        let score = scorer().calculate(&user("octocat"), &repos);

        assert_eq!(score.components.documentation, 80.0);
        assert_eq!(score.components.impact, 0.0);
        assert_eq!(score.components.depth, 60.0);
        assert_eq!(score.components.consistency, 80.0);
        // three single-language repos at 50, two at 70
        assert_eq!(score.components.code_quality, 58.0);
        assert_eq!(score.red_flags, vec![NO_STARS]);
        assert_eq!(
            score.strengths,
            vec!["Strong portfolio with 5 repositories", "Multiple well-documented projects"]
        );
        // 80*.25 + 58*.25 + 80*.2 + 0*.2 + 60*.1
        assert_eq!(score.overall, 56.5);
        assert_eq!(score.grade, Grade::F);
    }

    #[test]
    fn consistency_rewards_recent_events() {
        let repos = vec![
            analyzed_repo("a", 10, true, &["Go"]),
            analyzed_repo("b", 10, false, &["Go"]),
        ];
        let mut busy = user("busy");
        busy.recent_activity = 25;

        let score = scorer().calculate(&busy, &repos);
        assert_eq!(score.components.consistency, 40.0 + 10.0);

        busy.recent_activity = 500;
        let score = scorer().calculate(&busy, &repos);
        assert_eq!(score.components.consistency, 40.0 + 20.0);
    }

    #[test]
    fn impact_sums_stars_and_forks() {
        let mut a = analyzed_repo("a", 10, true, &[]);
        a.repository.stars = 4;
        let mut b = analyzed_repo("b", 10, true, &[]);
        b.repository.forks = 5;

        let score = scorer().calculate(&user("u"), &[a, b]);

        assert_eq!(score.components.impact, 23.0);
        assert!(!score.has_red_flag(NO_STARS));
    }

    #[test]
    fn depth_steps_with_language_count() {
        fn depth(langs: &[&str]) -> f64 {
            scorer()
                .calculate(&user("u"), &[analyzed_repo("a", 0, false, langs)])
                .components
                .depth
        }

        assert_eq!(depth(&[]), 20.0);
        assert_eq!(depth(&["C"]), 40.0);
        assert_eq!(depth(&["C", "Go"]), 60.0);
        assert_eq!(depth(&["C", "Go", "Lua"]), 80.0);
        assert_eq!(depth(&["C", "Go", "Lua", "Nim"]), 80.0);
        assert_eq!(depth(&["C", "Go", "Lua", "Nim", "Zig"]), 100.0);
    }

    #[test]
    fn neglected_portfolio_raises_flags() {
        let repos = vec![
            analyzed_repo("a", 0, false, &["C"]),
            analyzed_repo("b", 0, false, &["Go"]),
            analyzed_repo("c", 40, false, &["Lua"]),
        ];

        let score = scorer().calculate(&user("u"), &repos);

        assert_eq!(score.red_flags, vec![ALL_INACTIVE, MOST_MISSING_README, NO_STARS]);
        assert_eq!(
            score.strengths,
            vec!["Demonstrates proficiency in 3 programming languages"]
        );
    }

    #[test]
    fn scores_stay_in_range() {
        let mut repo = analyzed_repo("a", 100, true, &["C", "Go", "Lua", "Nim", "Zig"]);
        repo.repository.stars = 10_000;
        repo.score.code_quality = 250.0;
        let mut heavy = user("u");
        heavy.recent_activity = 1_000;

        let score = scorer().calculate(&heavy, &[repo]);

        for (_, value) in score.components.iter() {
            assert!((0.0..=100.0).contains(&value));
        }
        assert!((0.0..=100.0).contains(&score.overall));
        assert_eq!(score.overall, 100.0);
        assert_eq!(score.grade, Grade::A);
    }

    #[test]
    fn overall_uses_unrounded_components() {
        let repos: Vec<_> = (0..7)
            .map(|i| {
                let mut repo = analyzed_repo(&format!("r{}", i), 0, i < 3, &["Rust"]);
                if i >= 4 {
                    repo.score.code_quality = 65.0;
                }
                repo
            })
            .collect();

        let score = scorer().calculate(&user("octocat"), &repos);

        // 395/7 * .25 + 240/7 * .2 + 40 * .1 = 24.9643
        assert_eq!(score.components.code_quality, 56.43);
        assert_eq!(score.components.consistency, 34.29);
        assert_eq!(score.components.depth, 40.0);
        assert_eq!(score.overall, 24.96);
    }

    #[test]
    fn weakest_component_breaks_ties_in_order() {
        let components = ComponentScores {
            documentation: 50.0,
            code_quality: 20.0,
            consistency: 90.0,
            impact: 20.0,
            depth: 40.0,
        };
        assert_eq!(components.weakest(), Component::CodeQuality);
        assert_eq!(ComponentScores::default().weakest(), Component::Documentation);
    }
}
