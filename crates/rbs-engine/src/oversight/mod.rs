//! Operator risk assessment: the RBS scoring pipeline, the parallel legacy
//! scorer, surveillance findings, and the service/router plumbing that hosts
//! them.

pub mod domain;
pub mod findings;
pub mod legacy;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ComplexityFactors, ComplianceData, ComplianceFindingCounts, DeviationData, ExposureLevel,
    ImprovementData, LegacyRiskFactors, Occurrence, OccurrenceKind, OperatorId, OperatorSnapshot,
    RiskIndicatorLevel, RiskLevel, ScoreResult, SeverityLevel,
};
pub use findings::{
    target_completion_date, FindingCategory, FindingError, FindingId, FindingNarrative,
    SurveillanceFinding,
};
pub use legacy::{score_legacy, LegacyAssessment};
pub use repository::{OperatorRecord, OperatorRepository, OperatorStatusView, RepositoryError};
pub use router::oversight_router;
pub use scoring::{
    ComplianceFindingWeights, CorrectiveActionWeights, CycleMatrix, DeviationSeverityWeights,
    ExposureBands, ExposureWeights, IndicatorThresholds, LegacyWeights, PerformanceScores,
    PerformanceWeights, ScoringConfig, ScoringEngine, ScoringError,
};
pub use service::{NewFinding, OversightService, ServiceError};
