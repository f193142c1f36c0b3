use super::config::ScoringConfig;
use crate::oversight::domain::{ComplianceData, DeviationData, ImprovementData, RiskIndicatorLevel};

/// The three factor scores plus their weighted combination and its
/// classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceScores {
    pub compliance: f64,
    pub deviation: f64,
    pub improvement: f64,
    pub overall: f64,
    pub indicator: RiskIndicatorLevel,
}

pub(crate) fn score(
    compliance: &ComplianceData,
    deviations: &DeviationData,
    improvement: &ImprovementData,
    config: &ScoringConfig,
) -> PerformanceScores {
    let cw = &config.compliance_weights;
    let compliance_factor = normalized(
        cw.non_compliance * f64::from(compliance.findings.non_compliance)
            + cw.non_conformance * f64::from(compliance.findings.non_conformance)
            + cw.non_adherence * f64::from(compliance.findings.non_adherence),
        compliance.total_checklist_items,
    );

    let dw = &config.deviation_weights;
    let deviation_factor = normalized(
        dw.accident * f64::from(deviations.accident_count)
            + dw.serious_incident * f64::from(deviations.serious_incident_count)
            + dw.incident * f64::from(deviations.incident_count),
        deviations.total_flight_cycles,
    );

    let aw = &config.corrective_action_weights;
    let applied_total = improvement.corrective_actions_on_findings
        + improvement.corrective_actions_on_deviations;
    let improvement_factor = normalized(
        aw.root_cause_identified * f64::from(improvement.root_cause_identified)
            + aw.hazard_identified * f64::from(improvement.hazard_identified)
            + aw.risk_assessed * f64::from(improvement.risk_assessed)
            + aw.risk_mitigated * f64::from(improvement.risk_mitigated),
        applied_total,
    );

    let pw = &config.performance;
    // Sign convention: deviations subtract, compliance and improvement add.
    let overall = pw.compliance * compliance_factor - pw.deviation * deviation_factor
        + pw.improvement * improvement_factor;

    PerformanceScores {
        compliance: compliance_factor,
        deviation: deviation_factor,
        improvement: improvement_factor,
        overall,
        indicator: config.indicator_thresholds.classify(overall),
    }
}

/// Zero-guarded normalization: a factor with no denominator is defined as 0,
/// not an error.
fn normalized(weighted_sum: f64, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        weighted_sum / f64::from(denominator)
    }
}
