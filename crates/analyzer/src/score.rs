//! Letter grades and score arithmetic shared by the scorers

use serde::Serialize;
use std::fmt;

/// Letter grade for a 0-100 score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Grade::A
        } else if score >= 80.0 {
            Grade::B
        } else if score >= 70.0 {
            Grade::C
        } else if score >= 60.0 {
            Grade::D
        } else {
            Grade::F
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clamp into [0, 100]; NaN counts as 0
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Star and fork based score shared by repositories and portfolios
pub fn popularity(stars: i64, forks: i64) -> f64 {
    let raw = stars.max(0).saturating_mul(2).saturating_add(forks.max(0).saturating_mul(3));
    raw.min(100) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_cutoffs() {
        assert_eq!(Grade::from_score(100.0), Grade::A);
        assert_eq!(Grade::from_score(90.0), Grade::A);
        assert_eq!(Grade::from_score(89.99), Grade::B);
        assert_eq!(Grade::from_score(80.0), Grade::B);
        assert_eq!(Grade::from_score(70.0), Grade::C);
        assert_eq!(Grade::from_score(60.0), Grade::D);
        assert_eq!(Grade::from_score(59.99), Grade::F);
        assert_eq!(Grade::from_score(0.0), Grade::F);
    }

    #[test]
    fn clamps_out_of_range_values() {
        assert_eq!(clamp_score(-5.0), 0.0);
        assert_eq!(clamp_score(150.0), 100.0);
        assert_eq!(clamp_score(f64::NAN), 0.0);
        assert_eq!(clamp_score(42.5), 42.5);
    }

    #[test]
    fn popularity_is_capped() {
        assert_eq!(popularity(0, 0), 0.0);
        assert_eq!(popularity(5, 2), 16.0);
        assert_eq!(popularity(40, 10), 100.0);
        assert_eq!(popularity(i64::MAX, i64::MAX), 100.0);
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round2(12.3456), 12.35);
        assert_eq!(round2(7.0), 7.0);
    }
}
