//! Recruiter-style narrative review of a portfolio

use crate::action::{ActionItem, Priority};
use crate::portfolio::PortfolioScore;
use crate::repository::AnalyzedRepository;
use crate::score::Grade;
use gitfolio_model::UserRecord;
use rand::Rng;
use serde::Serialize;

const MAX_QUESTIONS: usize = 5;
const MAX_RECOMMENDATIONS: usize = 4;
const QUESTIONED_REPOS: usize = 2;

/// Who is reading the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Persona {
    #[serde(rename = "Technical Recruiter")]
    TechnicalRecruiter,
    #[serde(rename = "Hiring Manager")]
    HiringManager,
    #[serde(rename = "Tech Lead")]
    TechLead,
    #[serde(rename = "HR Specialist")]
    HrSpecialist,
}

impl Persona {
    pub const ALL: [Persona; 4] = [
        Persona::TechnicalRecruiter,
        Persona::HiringManager,
        Persona::TechLead,
        Persona::HrSpecialist,
    ];

    /// Pick a persona uniformly at random
    pub fn pick<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::TechnicalRecruiter => "Technical Recruiter",
            Persona::HiringManager => "Hiring Manager",
            Persona::TechLead => "Tech Lead",
            Persona::HrSpecialist => "HR Specialist",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Hire,
    Maybe,
    Reject,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Hire => "HIRE",
            Verdict::Maybe => "MAYBE",
            Verdict::Reject => "REJECT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Confidence {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HireDecision {
    pub decision: Verdict,
    pub confidence: Confidence,
    pub reasoning: String,
    pub score: f64,
    pub grade: Grade,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecruiterFeedback {
    pub recruiter_type: Persona,
    pub first_impression: String,
    pub decision: HireDecision,
    pub summary: String,
    pub strengths: Vec<String>,
    pub concerns: Vec<String>,
    pub interview_questions: Vec<String>,
    pub recommendations: Vec<ActionItem>,
}

/// Simulate a recruiter skimming the profile
pub fn review<R: Rng>(
    user: &UserRecord,
    repos: &[AnalyzedRepository],
    score: &PortfolioScore,
    rng: &mut R,
) -> RecruiterFeedback {
    RecruiterFeedback {
        recruiter_type: Persona::pick(rng),
        first_impression: first_impression(user, repos),
        decision: hire_decision(score),
        summary: summary(score, repos.len()),
        strengths: score.strengths.clone(),
        concerns: score.red_flags.clone(),
        interview_questions: interview_questions(repos),
        recommendations: recommendations(repos),
    }
}

fn first_impression(user: &UserRecord, repos: &[AnalyzedRepository]) -> String {
    let name = user.display_name();
    let count = repos.len();

    if count == 0 {
        return format!("⚠️ {} has no public repositories. This is a major concern.", name);
    }

    let documented = repos
        .iter()
        .filter(|r| r.documentation_analysis.quality_score > 50)
        .count();

    if documented * 2 > count {
        format!(
            "✅ Positive first impression! {} maintains {} well-documented repositories.",
            name, documented
        )
    } else if count >= 3 {
        format!(
            "👀 {} has {} repositories, but documentation quality varies.",
            name, count
        )
    } else {
        format!("🔍 Limited portfolio with only {} repositories to evaluate.", count)
    }
}

fn hire_decision(score: &PortfolioScore) -> HireDecision {
    let overall = score.overall;

    let (decision, confidence, reasoning) = if overall >= 80.0 {
        (
            Verdict::Hire,
            Confidence::High,
            "Strong portfolio with excellent documentation and consistent activity",
        )
    } else if overall >= 60.0 {
        (
            Verdict::Maybe,
            Confidence::Medium,
            "Decent portfolio but needs improvement in key areas",
        )
    } else {
        let confidence = if overall < 40.0 { Confidence::High } else { Confidence::Medium };
        (
            Verdict::Reject,
            confidence,
            "Portfolio lacks critical elements expected from candidates",
        )
    };

    HireDecision {
        decision,
        confidence,
        reasoning: reasoning.to_string(),
        score: overall,
        grade: score.grade,
    }
}

fn interview_questions(repos: &[AnalyzedRepository]) -> Vec<String> {
    if repos.is_empty() {
        return vec![
            "Can you walk us through your development experience?".to_string(),
            "What projects have you worked on that aren't on GitHub?".to_string(),
        ];
    }

    // Stable sort keeps the listing order among equal scores
    let mut ranked: Vec<&AnalyzedRepository> = repos.iter().collect();
    ranked.sort_by(|a, b| b.score.overall.total_cmp(&a.score.overall));

    let mut questions = Vec::new();
    for repo in ranked.into_iter().take(QUESTIONED_REPOS) {
        let name = repo.name();
        let language = repo.dominant_language().unwrap_or("Unknown");

        questions.push(format!("Tell me about your role in developing {}.", name));
        questions.push(format!("What challenges did you face while building {}?", name));
        questions.push(format!("How do you handle {} best practices in your projects?", language));
    }

    questions.push("How do you approach documentation in your projects?".to_string());
    questions.push("Describe your development workflow and commit practices.".to_string());

    questions.truncate(MAX_QUESTIONS);
    questions
}

fn summary(score: &PortfolioScore, repo_count: usize) -> String {
    let grade = score.grade;

    if score.overall >= 80.0 {
        format!(
            "Strong candidate with an impressive portfolio (Grade {}). Shows consistency across {} projects with good documentation practices.",
            grade, repo_count
        )
    } else if score.overall >= 60.0 {
        format!(
            "Promising candidate (Grade {}) with {} repositories. Shows potential but needs to improve documentation and project consistency.",
            grade, repo_count
        )
    } else {
        format!(
            "Entry-level candidate (Grade {}) with basic GitHub presence. Needs significant improvement to be competitive in the job market.",
            grade
        )
    }
}

fn recommendations(repos: &[AnalyzedRepository]) -> Vec<ActionItem> {
    if repos.is_empty() {
        return vec![
            ActionItem::new(
                "Start building public repositories",
                "Create repositories to showcase your coding skills and projects",
                Priority::Critical,
                "Ongoing",
            ),
            ActionItem::new(
                "Contribute to open source projects",
                "Find projects aligned with your interests and contribute code",
                Priority::High,
                "2-4 hours/week",
            ),
        ];
    }

    let mut items = Vec::new();

    let poorly_documented = repos
        .iter()
        .filter(|r| r.documentation_analysis.quality_score < 50)
        .count();
    if poorly_documented * 2 > repos.len() {
        items.push(ActionItem::new(
            "Improve README documentation",
            "Add clear descriptions, setup instructions, and usage examples to your projects",
            Priority::High,
            "1-2 hours per repo",
        ));
    }

    if repos.iter().any(|r| !r.activity_analysis.is_active) {
        items.push(ActionItem::new(
            "Show recent activity",
            "Make regular commits to demonstrate active development",
            Priority::Medium,
            "30 minutes/week",
        ));
    }

    items.push(ActionItem::new(
        "Pin your best repositories",
        "Select 3-6 repositories that best represent your skills and pin them to your profile",
        Priority::Medium,
        "15 minutes",
    ));
    items.push(ActionItem::new(
        "Add a detailed bio",
        "Update your GitHub profile with your current role, skills, and interests",
        Priority::Low,
        "10 minutes",
    ));

    items.truncate(MAX_RECOMMENDATIONS);
    items
}
