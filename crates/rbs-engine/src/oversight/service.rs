use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use super::domain::{OperatorId, OperatorSnapshot, ScoreResult};
use super::findings::{
    FindingCategory, FindingError, FindingId, FindingNarrative, SurveillanceFinding,
};
use super::legacy::score_legacy;
use super::repository::{OperatorRecord, OperatorRepository, RepositoryError};
use super::scoring::{ScoringConfig, ScoringEngine, ScoringError};

static OPERATOR_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static FINDING_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_operator_id() -> OperatorId {
    let id = OPERATOR_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    OperatorId(format!("op-{id:06}"))
}

fn next_finding_id() -> FindingId {
    let id = FINDING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    FindingId(format!("fnd-{id:06}"))
}

/// Request payload for opening a surveillance finding. The creation date is
/// explicit; the clock belongs to the caller, never to the engine.
#[derive(Debug, Clone, Deserialize)]
pub struct NewFinding {
    pub category: FindingCategory,
    pub created_on: NaiveDate,
    #[serde(default)]
    pub narrative: FindingNarrative,
}

/// Service composing the repository and the scoring engine. Both pipelines
/// (RBS and legacy) are recomputed together and the derived record is
/// replaced wholesale, never patched in place.
pub struct OversightService<R> {
    repository: Arc<R>,
    engine: Arc<ScoringEngine>,
}

impl<R> OversightService<R>
where
    R: OperatorRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: ScoringConfig) -> Self {
        Self {
            repository,
            engine: Arc::new(ScoringEngine::new(config)),
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Register a new operator: assign an identifier, run both scoring
    /// pipelines, and store the record.
    pub fn register(
        &self,
        mut snapshot: OperatorSnapshot,
    ) -> Result<OperatorRecord, ServiceError> {
        snapshot.operator_id = next_operator_id();

        let score = self.engine.score(&snapshot)?;
        let legacy =
            score_legacy(&snapshot.legacy, &self.engine.config().legacy_weights)?;

        info!(
            operator = %snapshot.operator_id.0,
            category = %score.final_risk_category,
            cycle_months = score.suggested_cycle_months,
            "operator registered"
        );

        let record = OperatorRecord {
            snapshot,
            score: Some(score),
            legacy_assessment: Some(legacy),
            findings: Vec::new(),
        };

        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    /// Recompute both assessments from the stored snapshot and replace the
    /// derived record atomically.
    pub fn rescore(&self, operator_id: &OperatorId) -> Result<ScoreResult, ServiceError> {
        let mut record = self.fetch_record(operator_id)?;

        let score = self.engine.score(&record.snapshot)?;
        let legacy =
            score_legacy(&record.snapshot.legacy, &self.engine.config().legacy_weights)?;

        record.score = Some(score.clone());
        record.legacy_assessment = Some(legacy);
        self.repository.update(record)?;

        info!(
            operator = %operator_id.0,
            category = %score.final_risk_category,
            "operator rescored"
        );

        Ok(score)
    }

    /// Replace the stored raw snapshot and rescore in the same update.
    pub fn update_snapshot(
        &self,
        operator_id: &OperatorId,
        mut snapshot: OperatorSnapshot,
    ) -> Result<ScoreResult, ServiceError> {
        let mut record = self.fetch_record(operator_id)?;

        snapshot.operator_id = operator_id.clone();
        let score = self.engine.score(&snapshot)?;
        let legacy = score_legacy(&snapshot.legacy, &self.engine.config().legacy_weights)?;

        record.snapshot = snapshot;
        record.score = Some(score.clone());
        record.legacy_assessment = Some(legacy);
        self.repository.update(record)?;

        Ok(score)
    }

    pub fn get(&self, operator_id: &OperatorId) -> Result<OperatorRecord, ServiceError> {
        self.fetch_record(operator_id)
    }

    pub fn list(&self) -> Result<Vec<OperatorRecord>, ServiceError> {
        Ok(self.repository.list()?)
    }

    /// Open a finding against an operator; the target completion date is
    /// derived from the category window at creation and never recomputed.
    pub fn open_finding(
        &self,
        operator_id: &OperatorId,
        request: NewFinding,
    ) -> Result<SurveillanceFinding, ServiceError> {
        let mut record = self.fetch_record(operator_id)?;

        let finding = SurveillanceFinding::open(
            next_finding_id(),
            request.category,
            request.created_on,
            request.narrative,
        );
        record.findings.push(finding.clone());
        self.repository.update(record)?;

        info!(
            operator = %operator_id.0,
            finding = %finding.finding_id.0,
            target = %finding.target_completion_date,
            "finding opened"
        );

        Ok(finding)
    }

    /// One-way completion of a finding.
    pub fn complete_finding(
        &self,
        operator_id: &OperatorId,
        finding_id: &FindingId,
        completed_on: NaiveDate,
    ) -> Result<SurveillanceFinding, ServiceError> {
        let mut record = self.fetch_record(operator_id)?;

        let finding = record
            .findings
            .iter_mut()
            .find(|finding| &finding.finding_id == finding_id)
            .ok_or_else(|| ServiceError::UnknownFinding(finding_id.0.clone()))?;
        finding.complete(completed_on)?;
        let completed = finding.clone();

        self.repository.update(record)?;
        Ok(completed)
    }

    /// Replace the narrative fields of an open finding.
    pub fn amend_finding(
        &self,
        operator_id: &OperatorId,
        finding_id: &FindingId,
        narrative: FindingNarrative,
    ) -> Result<SurveillanceFinding, ServiceError> {
        let mut record = self.fetch_record(operator_id)?;

        let finding = record
            .findings
            .iter_mut()
            .find(|finding| &finding.finding_id == finding_id)
            .ok_or_else(|| ServiceError::UnknownFinding(finding_id.0.clone()))?;
        finding.amend(narrative)?;
        let amended = finding.clone();

        self.repository.update(record)?;
        Ok(amended)
    }

    fn fetch_record(&self, operator_id: &OperatorId) -> Result<OperatorRecord, ServiceError> {
        Ok(self
            .repository
            .fetch(operator_id)?
            .ok_or(RepositoryError::NotFound)?)
    }
}

/// Error raised by the oversight service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Finding(#[from] FindingError),
    #[error("finding {0} not found")]
    UnknownFinding(String),
}
