//! GitFolio Portfolio Analyzer
//!
//! Scores repositories and portfolios, simulates a recruiter review and
//! builds an improvement roadmap.

pub mod action;
pub mod clock;
pub mod config;
pub mod pipeline;
pub mod portfolio;
pub mod recruiter;
pub mod repository;
pub mod roadmap;
pub mod score;

#[cfg(test)]
mod testing;

pub use action::{ActionItem, Priority};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ScoringConfig, ScoringWeights};
pub use pipeline::{ProfileAnalyzer, ProfileReport};
pub use portfolio::{Component, ComponentScores, PortfolioScore, PortfolioScorer};
pub use recruiter::{Persona, RecruiterFeedback, Verdict};
pub use repository::{AnalyzedRepository, RepositoryAnalyzer};
pub use roadmap::Roadmap;
pub use score::Grade;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Data source error: {0}")]
    Source(#[from] gitfolio_collector::CollectorError),

    #[error("Invalid scoring configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
