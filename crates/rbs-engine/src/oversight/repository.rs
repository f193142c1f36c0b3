use serde::{Deserialize, Serialize};

use super::domain::{OperatorId, OperatorSnapshot, ScoreResult};
use super::findings::SurveillanceFinding;
use super::legacy::LegacyAssessment;

/// Repository record: the raw snapshot plus the derived assessments and the
/// finding log. The derived fields are `None` only before the first scoring
/// pass and are always replaced wholesale afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorRecord {
    pub snapshot: OperatorSnapshot,
    pub score: Option<ScoreResult>,
    pub legacy_assessment: Option<LegacyAssessment>,
    pub findings: Vec<SurveillanceFinding>,
}

impl OperatorRecord {
    pub fn open_findings(&self) -> usize {
        self.findings
            .iter()
            .filter(|finding| !finding.completed)
            .count()
    }

    pub fn status_view(&self) -> OperatorStatusView {
        OperatorStatusView {
            operator_id: self.snapshot.operator_id.clone(),
            name: self.snapshot.name.clone(),
            aoc_number: self.snapshot.aoc_number.clone(),
            final_risk_category: self
                .score
                .as_ref()
                .map(|score| score.final_risk_category.clone()),
            risk_indicator_level: self
                .score
                .as_ref()
                .map(|score| score.risk_indicator_level.digit()),
            suggested_cycle_months: self.score.as_ref().map(|score| score.suggested_cycle_months),
            legacy_risk_level: self
                .legacy_assessment
                .map(|assessment| assessment.level.label()),
            open_findings: self.open_findings(),
        }
    }
}

/// Sanitized representation of an operator's current standing for API
/// responses.
#[derive(Debug, Clone, Serialize)]
pub struct OperatorStatusView {
    pub operator_id: OperatorId,
    pub name: String,
    pub aoc_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_risk_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_indicator_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_cycle_months: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legacy_risk_level: Option<&'static str>,
    pub open_findings: usize,
}

/// Storage abstraction so the service can be exercised in isolation; the
/// engine itself never reads or writes persistence.
pub trait OperatorRepository: Send + Sync {
    fn insert(&self, record: OperatorRecord) -> Result<OperatorRecord, RepositoryError>;
    fn update(&self, record: OperatorRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &OperatorId) -> Result<Option<OperatorRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<OperatorRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
