mod config;
mod cycle;
mod exposure;
mod performance;

pub use config::{
    ComplianceFindingWeights, CorrectiveActionWeights, DeviationSeverityWeights, ExposureBands,
    ExposureWeights, IndicatorThresholds, LegacyWeights, PerformanceWeights, ScoringConfig,
};
pub use cycle::CycleMatrix;
pub use performance::PerformanceScores;

use crate::oversight::domain::{
    ComplexityFactors, ExposureLevel, OperatorSnapshot, RiskIndicatorLevel, ScoreResult,
};

/// Contract violations surfaced by the scoring pipeline. Counts are unsigned
/// and every categorical level is a closed enum, so only the few remaining
/// representable invalid inputs appear here.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("average fleet age must be a finite, non-negative number of years, got {0}")]
    InvalidFleetAge(f64),
    #[error("{rating} rating must be between 1 and 5, got {value}")]
    RatingOutOfRange { rating: &'static str, value: u8 },
}

/// Stateless engine applying the injected constant tables to an operator
/// snapshot. Pure and synchronous: callers may score different operators
/// concurrently without coordination.
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Exposure classifier: complexity attributes to a continuous score and
    /// an A..E band.
    pub fn classify_exposure(
        &self,
        complexity: &ComplexityFactors,
    ) -> Result<(f64, ExposureLevel), ScoringError> {
        exposure::classify(
            complexity,
            &self.config.exposure_weights,
            &self.config.exposure_bands,
        )
    }

    /// Performance scorer: the three weighted factor scores, their
    /// combination, and the 1..5 indicator classification.
    pub fn score_performance(&self, snapshot: &OperatorSnapshot) -> PerformanceScores {
        performance::score(
            &snapshot.compliance,
            &snapshot.deviations,
            &snapshot.improvement,
            &self.config,
        )
    }

    /// Surveillance cycle resolver: total over all 25 (exposure, indicator)
    /// pairs, so it cannot fail.
    pub fn resolve_cycle(&self, exposure: ExposureLevel, indicator: RiskIndicatorLevel) -> u8 {
        self.config.cycle_matrix.months(exposure, indicator)
    }

    /// Run the full pipeline and assemble the derived record. Either a
    /// complete [`ScoreResult`] is returned or an error; there is no partial
    /// result.
    pub fn score(&self, snapshot: &OperatorSnapshot) -> Result<ScoreResult, ScoringError> {
        let (exposure_score, exposure_level) = self.classify_exposure(&snapshot.complexity)?;
        let performance = self.score_performance(snapshot);
        let cycle = self.resolve_cycle(exposure_level, performance.indicator);

        Ok(ScoreResult {
            exposure_score,
            exposure_level,
            compliance_factor_score: performance.compliance,
            deviation_factor_score: performance.deviation,
            improvement_factor_score: performance.improvement,
            overall_performance_score: performance.overall,
            risk_indicator_level: performance.indicator,
            final_risk_category: ScoreResult::category_key(exposure_level, performance.indicator),
            suggested_cycle_months: cycle,
        })
    }
}
