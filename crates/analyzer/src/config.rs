//! Scoring configuration

use crate::{AnalyzerError, Result};
use serde::{Deserialize, Serialize};

/// Weights of the five portfolio components. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub documentation: f64,
    pub code_quality: f64,
    pub consistency: f64,
    pub impact: f64,
    pub depth: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            documentation: 0.25,
            code_quality: 0.25,
            consistency: 0.20,
            impact: 0.20,
            depth: 0.10,
        }
    }
}

impl ScoringWeights {
    fn as_array(&self) -> [(&'static str, f64); 5] {
        [
            ("documentation", self.documentation),
            ("code_quality", self.code_quality),
            ("consistency", self.consistency),
            ("impact", self.impact),
            ("depth", self.depth),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        for (name, weight) in self.as_array() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(AnalyzerError::InvalidConfig(format!(
                    "weight {} must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }

        let total: f64 = self.as_array().iter().map(|(_, w)| w).sum();
        if (total - 1.0).abs() > 1e-6 {
            return Err(AnalyzerError::InvalidConfig(format!(
                "weights must sum to 1.0, got {}",
                total
            )));
        }

        Ok(())
    }
}

/// Thresholds and limits used by the scoring pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    /// A repository is active if its last commit is younger than this
    pub active_days_threshold: i64,
    /// READMEs shorter than this many characters count as too brief
    pub good_readme_length: usize,
    /// Repositories beyond this count are not analyzed
    pub max_repos: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            active_days_threshold: 30,
            good_readme_length: 100,
            max_repos: 20,
        }
    }
}

impl ScoringConfig {
    /// Check the configuration once, before any request is served
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;

        if self.active_days_threshold <= 0 {
            return Err(AnalyzerError::InvalidConfig(
                "active_days_threshold must be positive".to_string(),
            ));
        }
        if self.max_repos == 0 {
            return Err(AnalyzerError::InvalidConfig("max_repos must be positive".to_string()));
        }

        Ok(())
    }
}
