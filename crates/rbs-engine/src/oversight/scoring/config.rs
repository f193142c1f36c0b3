use serde::{Deserialize, Serialize};

use super::cycle::CycleMatrix;
use crate::oversight::domain::{ExposureLevel, RiskIndicatorLevel};

/// Outer weights combining the three factor scores into the overall
/// performance score: `F = wc*C - wd*D + wi*I`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceWeights {
    pub compliance: f64,
    pub deviation: f64,
    pub improvement: f64,
}

impl Default for PerformanceWeights {
    fn default() -> Self {
        Self {
            compliance: 0.75,
            deviation: 1.00,
            improvement: 0.25,
        }
    }
}

/// Severity weights for compliance finding counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplianceFindingWeights {
    pub non_compliance: f64,
    pub non_conformance: f64,
    pub non_adherence: f64,
}

impl Default for ComplianceFindingWeights {
    fn default() -> Self {
        Self {
            non_compliance: 0.50,
            non_conformance: 0.35,
            non_adherence: 0.15,
        }
    }
}

/// Severity weights for deviation counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviationSeverityWeights {
    pub accident: f64,
    pub serious_incident: f64,
    pub incident: f64,
}

impl Default for DeviationSeverityWeights {
    fn default() -> Self {
        Self {
            accident: 0.50,
            serious_incident: 0.35,
            incident: 0.15,
        }
    }
}

/// Weights for the four graduated corrective-action stages, ordered by
/// maturity. A fully mitigated risk counts for four times a bare root cause.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrectiveActionWeights {
    pub root_cause_identified: f64,
    pub hazard_identified: f64,
    pub risk_assessed: f64,
    pub risk_mitigated: f64,
}

impl Default for CorrectiveActionWeights {
    fn default() -> Self {
        Self {
            root_cause_identified: 0.25,
            hazard_identified: 0.50,
            risk_assessed: 0.75,
            risk_mitigated: 1.00,
        }
    }
}

/// Ascending thresholds mapping the overall performance score to a risk
/// indicator level. The scale is inverted (a low score is bad) and a score
/// exactly at a threshold belongs to the stricter level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorThresholds {
    pub very_high_max: f64,
    pub high_max: f64,
    pub medium_max: f64,
    pub low_max: f64,
}

impl IndicatorThresholds {
    pub fn classify(&self, overall_score: f64) -> RiskIndicatorLevel {
        if overall_score <= self.very_high_max {
            RiskIndicatorLevel::VeryHigh
        } else if overall_score <= self.high_max {
            RiskIndicatorLevel::High
        } else if overall_score <= self.medium_max {
            RiskIndicatorLevel::Medium
        } else if overall_score <= self.low_max {
            RiskIndicatorLevel::Low
        } else {
            RiskIndicatorLevel::VeryLow
        }
    }
}

impl Default for IndicatorThresholds {
    fn default() -> Self {
        Self {
            very_high_max: 35.0,
            high_max: 60.0,
            medium_max: 75.0,
            low_max: 85.0,
        }
    }
}

/// Coefficients of the exposure score. Volume-like inputs (flights,
/// employees) enter through `ln(1 + x)` so raw flight counts do not drown
/// out the structural attributes; everything else is linear. Every weight is
/// strictly positive, which makes the score monotonic in each input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExposureWeights {
    pub flight_volume: f64,
    pub workforce: f64,
    pub fleet_size: f64,
    pub fleet_mix: f64,
    pub network: f64,
    pub domestic_bases: f64,
    pub international_bonus: f64,
    pub fleet_age: f64,
}

impl Default for ExposureWeights {
    fn default() -> Self {
        Self {
            flight_volume: 2.0,
            workforce: 1.5,
            fleet_size: 0.4,
            fleet_mix: 1.0,
            network: 0.2,
            domestic_bases: 0.5,
            international_bonus: 5.0,
            fleet_age: 0.3,
        }
    }
}

/// Ascending cut points bucketing the exposure score into the A..E bands.
/// A score exactly at a cut point belongs to the lower band; everything
/// above `d_max` is band E, so the banding is total over non-negative scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExposureBands {
    pub a_max: f64,
    pub b_max: f64,
    pub c_max: f64,
    pub d_max: f64,
}

impl ExposureBands {
    pub fn band(&self, exposure_score: f64) -> ExposureLevel {
        if exposure_score <= self.a_max {
            ExposureLevel::A
        } else if exposure_score <= self.b_max {
            ExposureLevel::B
        } else if exposure_score <= self.c_max {
            ExposureLevel::C
        } else if exposure_score <= self.d_max {
            ExposureLevel::D
        } else {
            ExposureLevel::E
        }
    }
}

impl Default for ExposureBands {
    fn default() -> Self {
        Self {
            a_max: 25.0,
            b_max: 50.0,
            c_max: 75.0,
            d_max: 100.0,
        }
    }
}

/// Outer weights of the legacy score; occurrence severities carry their own
/// fixed weights on [`crate::oversight::domain::SeverityLevel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyWeights {
    pub aircraft_frequency: u32,
    pub environmental_complexity: u32,
}

impl Default for LegacyWeights {
    fn default() -> Self {
        Self {
            aircraft_frequency: 2,
            environmental_complexity: 2,
        }
    }
}

/// The complete constant-table configuration of the scoring engine.
///
/// Defaults reproduce the reference tables of the oversight program; tests
/// and deployments can substitute alternates without touching the engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub performance: PerformanceWeights,
    pub compliance_weights: ComplianceFindingWeights,
    pub deviation_weights: DeviationSeverityWeights,
    pub corrective_action_weights: CorrectiveActionWeights,
    pub indicator_thresholds: IndicatorThresholds,
    pub exposure_weights: ExposureWeights,
    pub exposure_bands: ExposureBands,
    pub cycle_matrix: CycleMatrix,
    pub legacy_weights: LegacyWeights,
}
