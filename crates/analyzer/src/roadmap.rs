//! Three-horizon improvement roadmap

use crate::action::{ActionItem, Priority};
use crate::portfolio::{Component, PortfolioScore, NO_REPOSITORIES};
use crate::repository::AnalyzedRepository;
use crate::score::round2;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

const MAX_IMMEDIATE_ACTIONS: usize = 4;
const MAX_SHORT_TERM_GOALS: usize = 3;
const SHORT_TERM_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Roadmap {
    pub generated_at: DateTime<Utc>,
    pub timeline: Timeline,
    pub priority_focus: String,
    pub estimated_impact: EstimatedImpact,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    pub immediate: Horizon<ActionItem>,
    pub short_term: Horizon<ShortTermGoal>,
    pub long_term: LongTermHorizon,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Horizon<T> {
    pub timeframe: String,
    pub actions: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongTermHorizon {
    pub timeframe: String,
    pub goals: Vec<LongTermGoal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortTermGoal {
    pub goal: String,
    pub tasks: Vec<String>,
    pub target_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongTermGoal {
    pub goal: String,
    #[serde(flatten)]
    pub plan: GoalPlan,
}

/// Checklist attached to a long-term goal
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GoalPlan {
    Milestones {
        milestones: Vec<String>,
        success_criteria: Vec<String>,
    },
    Steps {
        steps: Vec<String>,
    },
    Actions {
        actions: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimatedImpact {
    pub current_score: f64,
    pub potential_score: f64,
    pub improvement: f64,
    pub timeframe: String,
}

/// Build the roadmap for a scored portfolio as of `now`
pub fn generate(score: &PortfolioScore, repos: &[AnalyzedRepository], now: DateTime<Utc>) -> Roadmap {
    let target_date = (now + Duration::days(SHORT_TERM_DAYS)).date_naive();

    Roadmap {
        generated_at: now,
        timeline: Timeline {
            immediate: Horizon {
                timeframe: "Next 7 Days".to_string(),
                actions: immediate_actions(score, repos),
            },
            short_term: Horizon {
                timeframe: "Next 30 Days".to_string(),
                actions: short_term_goals(repos, target_date),
            },
            long_term: LongTermHorizon {
                timeframe: "Next 90 Days".to_string(),
                goals: long_term_goals(),
            },
        },
        priority_focus: focus_area(score.components.weakest()).to_string(),
        estimated_impact: estimate_impact(score.overall),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn immediate_actions(score: &PortfolioScore, repos: &[AnalyzedRepository]) -> Vec<ActionItem> {
    let mut actions = Vec::new();

    if score.has_red_flag(NO_REPOSITORIES) {
        actions.push(ActionItem::new(
            "Create your first public repository",
            "Start with a simple project to showcase your skills",
            Priority::Critical,
            "2-3 hours",
        ));
    }

    if let Some(repo) = repos.iter().find(|r| !r.documentation_analysis.has_readme) {
        actions.push(ActionItem::new(
            format!("Add README to {}", repo.name()),
            "Include project description, setup instructions, and usage examples",
            Priority::High,
            "1-2 hours",
        ));
    }

    actions.push(ActionItem::new(
        "Pin your best repositories",
        "Select 3-6 repositories that best represent your skills",
        Priority::Medium,
        "15 minutes",
    ));
    actions.push(ActionItem::new(
        "Update your GitHub profile bio",
        "Add your current role, skills, and what you're looking for",
        Priority::Medium,
        "30 minutes",
    ));

    actions.truncate(MAX_IMMEDIATE_ACTIONS);
    actions
}

fn short_term_goals(repos: &[AnalyzedRepository], target_date: NaiveDate) -> Vec<ShortTermGoal> {
    let mut goals = Vec::new();

    if repos.iter().any(|r| r.documentation_analysis.quality_score < 50) {
        goals.push(ShortTermGoal {
            goal: "Improve documentation for 3 repositories".to_string(),
            tasks: strings(&[
                "Add setup instructions",
                "Include usage examples",
                "Add badges for build status, license",
            ]),
            target_date,
        });
    }

    goals.push(ShortTermGoal {
        goal: "Establish consistent commit pattern".to_string(),
        tasks: strings(&[
            "Commit at least 4 times per week",
            "Work on one project consistently",
            "Create a contribution schedule",
        ]),
        target_date,
    });
    goals.push(ShortTermGoal {
        goal: "Start a new project in a different language".to_string(),
        tasks: strings(&[
            "Choose a language you want to learn",
            "Build a small utility or tool",
            "Document the learning process",
        ]),
        target_date,
    });

    goals.truncate(MAX_SHORT_TERM_GOALS);
    goals
}

fn long_term_goals() -> Vec<LongTermGoal> {
    vec![
        LongTermGoal {
            goal: "Complete a portfolio-worthy project".to_string(),
            plan: GoalPlan::Milestones {
                milestones: strings(&[
                    "Week 1-2: Project planning and setup",
                    "Week 3-6: Core feature development",
                    "Week 7-8: Testing and documentation",
                    "Week 9-10: Deployment and polish",
                ]),
                success_criteria: strings(&[
                    "Comprehensive README",
                    "Working demo",
                    "Tests coverage > 70%",
                    "Clear documentation",
                ]),
            },
        },
        LongTermGoal {
            goal: "Contribute to an open source project".to_string(),
            plan: GoalPlan::Steps {
                steps: strings(&[
                    "Find a project aligned with your skills",
                    "Start with good first issues",
                    "Submit 2-3 meaningful PRs",
                    "Engage with the community",
                ]),
            },
        },
        LongTermGoal {
            goal: "Demonstrate technical depth".to_string(),
            plan: GoalPlan::Actions {
                actions: strings(&[
                    "Add tests to existing projects",
                    "Implement CI/CD pipeline",
                    "Create project documentation site",
                    "Add code comments and examples",
                ]),
            },
        },
    ]
}

fn focus_area(component: Component) -> &'static str {
    match component {
        Component::Documentation => "Improving documentation quality",
        Component::CodeQuality => "Enhancing code structure and best practices",
        Component::Consistency => "Establishing regular contribution patterns",
        Component::Impact => "Building projects with real-world impact",
        Component::Depth => "Expanding technical skill diversity",
    }
}

fn estimate_impact(current: f64) -> EstimatedImpact {
    let gain = if current < 50.0 {
        30.0
    } else if current < 70.0 {
        20.0
    } else {
        10.0
    };
    let potential = (current + gain).min(100.0);

    EstimatedImpact {
        current_score: current,
        potential_score: potential,
        improvement: round2(potential - current),
        timeframe: "3 months with consistent effort".to_string(),
    }
}
