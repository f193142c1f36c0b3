//! Older weighted risk score retained in parallel for comparison. It does
//! not feed the RBS pipeline.

use serde::{Deserialize, Serialize};

use super::domain::{LegacyRiskFactors, RiskLevel};
use super::scoring::{LegacyWeights, ScoringError};

/// Output of the legacy scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyAssessment {
    pub score: u32,
    pub level: RiskLevel,
}

/// Score = weighted frequency + weighted environmental complexity + the sum
/// of occurrence severity weights. An empty occurrence list is valid and
/// contributes 0. Ratings outside 1..=5 fail fast.
pub fn score_legacy(
    factors: &LegacyRiskFactors,
    weights: &LegacyWeights,
) -> Result<LegacyAssessment, ScoringError> {
    check_rating("aircraft frequency", factors.aircraft_frequency)?;
    check_rating("environmental complexity", factors.environmental_complexity)?;

    let occurrence_score: u32 = factors
        .occurrences
        .iter()
        .map(|occurrence| occurrence.severity.weight())
        .sum();

    let score = weights.aircraft_frequency * u32::from(factors.aircraft_frequency)
        + weights.environmental_complexity * u32::from(factors.environmental_complexity)
        + occurrence_score;

    Ok(LegacyAssessment {
        score,
        level: classify(score),
    })
}

/// Fixed, non-overlapping, ascending bands with inclusive upper bounds.
fn classify(score: u32) -> RiskLevel {
    match score {
        0..=10 => RiskLevel::Low,
        11..=25 => RiskLevel::Medium,
        26..=40 => RiskLevel::High,
        _ => RiskLevel::Critical,
    }
}

fn check_rating(rating: &'static str, value: u8) -> Result<(), ScoringError> {
    if (1..=5).contains(&value) {
        Ok(())
    } else {
        Err(ScoringError::RatingOutOfRange { rating, value })
    }
}
