use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::oversight::domain::{
    ComplexityFactors, ComplianceData, ComplianceFindingCounts, DeviationData, ImprovementData,
    LegacyRiskFactors, Occurrence, OccurrenceKind, OperatorId, OperatorSnapshot, SeverityLevel,
};
use crate::oversight::repository::{OperatorRecord, OperatorRepository, RepositoryError};
use crate::oversight::router::oversight_router;
use crate::oversight::scoring::{ScoringConfig, ScoringEngine};
use crate::oversight::service::OversightService;

pub(super) fn scoring_config() -> ScoringConfig {
    ScoringConfig::default()
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(scoring_config())
}

pub(super) fn quiet_complexity() -> ComplexityFactors {
    ComplexityFactors {
        annual_flight_count: 0,
        employee_count: 0,
        aircraft_count: 0,
        aircraft_model_count: 0,
        destination_count: 0,
        international_ops: false,
        avg_fleet_age_years: 0.0,
        domestic_base_count: 0,
    }
}

pub(super) fn regional_complexity() -> ComplexityFactors {
    ComplexityFactors {
        annual_flight_count: 8_000,
        employee_count: 250,
        aircraft_count: 6,
        aircraft_model_count: 2,
        destination_count: 12,
        international_ops: false,
        avg_fleet_age_years: 14.0,
        domestic_base_count: 2,
    }
}

pub(super) fn flag_carrier_complexity() -> ComplexityFactors {
    ComplexityFactors {
        annual_flight_count: 180_000,
        employee_count: 12_000,
        aircraft_count: 140,
        aircraft_model_count: 9,
        destination_count: 110,
        international_ops: true,
        avg_fleet_age_years: 8.5,
        domestic_base_count: 12,
    }
}

pub(super) fn clean_history() -> (ComplianceData, DeviationData, ImprovementData) {
    (
        ComplianceData {
            findings: ComplianceFindingCounts {
                non_compliance: 0,
                non_conformance: 0,
                non_adherence: 0,
            },
            total_checklist_items: 100,
        },
        DeviationData {
            accident_count: 0,
            serious_incident_count: 0,
            incident_count: 0,
            total_flight_cycles: 1_000,
        },
        ImprovementData {
            total_deviations_addressed: 0,
            total_findings_addressed: 0,
            root_cause_identified: 0,
            hazard_identified: 0,
            risk_assessed: 0,
            risk_mitigated: 0,
            corrective_actions_on_findings: 0,
            corrective_actions_on_deviations: 0,
        },
    )
}

pub(super) fn benign_legacy() -> LegacyRiskFactors {
    LegacyRiskFactors {
        aircraft_frequency: 1,
        environmental_complexity: 1,
        occurrences: Vec::new(),
    }
}

pub(super) fn occurrence(severity: SeverityLevel) -> Occurrence {
    Occurrence {
        occurred_on: NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid date"),
        kind: OccurrenceKind::Incident,
        severity,
        description: "runway excursion during taxi".to_string(),
    }
}

pub(super) fn snapshot(name: &str, complexity: ComplexityFactors) -> OperatorSnapshot {
    let (compliance, deviations, improvement) = clean_history();
    OperatorSnapshot {
        operator_id: OperatorId::default(),
        name: name.to_string(),
        aoc_number: format!("AOC-{}", name.len()),
        complexity,
        compliance,
        deviations,
        improvement,
        legacy: benign_legacy(),
    }
}

pub(super) fn build_service() -> (OversightService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = OversightService::new(repository.clone(), scoring_config());
    (service, repository)
}

pub(super) fn router() -> axum::Router {
    let (service, _repository) = build_service();
    oversight_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<OperatorId, OperatorRecord>>>,
}

impl OperatorRepository for MemoryRepository {
    fn insert(&self, record: OperatorRecord) -> Result<OperatorRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.snapshot.operator_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.snapshot.operator_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: OperatorRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.snapshot.operator_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &OperatorId) -> Result<Option<OperatorRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<OperatorRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

pub(super) struct UnavailableRepository;

impl OperatorRepository for UnavailableRepository {
    fn insert(&self, _record: OperatorRecord) -> Result<OperatorRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: OperatorRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &OperatorId) -> Result<Option<OperatorRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<OperatorRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
