use super::config::{ExposureBands, ExposureWeights};
use super::ScoringError;
use crate::oversight::domain::{ComplexityFactors, ExposureLevel};

/// Aggregate the eight complexity attributes into one continuous exposure
/// score and bucket it into an A..E band.
///
/// Counts are unsigned, so the only invalid domain value a snapshot can
/// carry is a negative or non-finite fleet age; that fails fast instead of
/// being clamped.
pub(crate) fn classify(
    complexity: &ComplexityFactors,
    weights: &ExposureWeights,
    bands: &ExposureBands,
) -> Result<(f64, ExposureLevel), ScoringError> {
    let fleet_age = complexity.avg_fleet_age_years;
    if !fleet_age.is_finite() || fleet_age < 0.0 {
        return Err(ScoringError::InvalidFleetAge(fleet_age));
    }

    let mut score = weights.flight_volume * log_scaled(complexity.annual_flight_count)
        + weights.workforce * log_scaled(complexity.employee_count)
        + weights.fleet_size * f64::from(complexity.aircraft_count)
        + weights.fleet_mix * f64::from(complexity.aircraft_model_count)
        + weights.network * f64::from(complexity.destination_count)
        + weights.domestic_bases * f64::from(complexity.domestic_base_count)
        + weights.fleet_age * fleet_age;

    if complexity.international_ops {
        score += weights.international_bonus;
    }

    Ok((score, bands.band(score)))
}

/// `ln(1 + x)`: keeps volume-like counts from dominating the linear terms
/// while staying strictly increasing.
fn log_scaled(count: u32) -> f64 {
    (1.0 + f64::from(count)).ln()
}
