use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use rbs_engine::oversight::{
    ComplexityFactors, ComplianceData, ComplianceFindingCounts, DeviationData, FindingCategory,
    FindingNarrative, ImprovementData, LegacyRiskFactors, NewFinding, Occurrence, OccurrenceKind,
    OperatorId, OperatorRecord, OperatorRepository, OperatorSnapshot, OversightService,
    RepositoryError, RiskLevel, ScoringConfig, SeverityLevel,
};

#[derive(Default)]
struct InMemoryRepository {
    records: Mutex<HashMap<OperatorId, OperatorRecord>>,
}

impl OperatorRepository for InMemoryRepository {
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

fn service() -> OversightService<InMemoryRepository> {
    OversightService::new(Arc::new(InMemoryRepository::default()), ScoringConfig::default())
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn regional_snapshot() -> OperatorSnapshot {
    OperatorSnapshot {
        operator_id: OperatorId::default(),
        name: "Archipelago Air".to_string(),
        aoc_number: "AOC-2041".to_string(),
        complexity: ComplexityFactors {
            annual_flight_count: 8_000,
            employee_count: 250,
            aircraft_count: 6,
            aircraft_model_count: 2,
            destination_count: 12,
            international_ops: false,
            avg_fleet_age_years: 14.0,
            domestic_base_count: 2,
        },
        compliance: ComplianceData {
            findings: ComplianceFindingCounts {
                non_compliance: 1,
                non_conformance: 2,
                non_adherence: 3,
            },
            total_checklist_items: 120,
        },
        deviations: DeviationData {
            accident_count: 0,
            serious_incident_count: 0,
            incident_count: 2,
            total_flight_cycles: 8_000,
        },
        improvement: ImprovementData {
            total_deviations_addressed: 2,
            total_findings_addressed: 6,
            root_cause_identified: 4,
            hazard_identified: 3,
            risk_assessed: 3,
            risk_mitigated: 2,
            corrective_actions_on_findings: 6,
            corrective_actions_on_deviations: 2,
        },
        legacy: LegacyRiskFactors {
            aircraft_frequency: 2,
            environmental_complexity: 2,
            occurrences: vec![Occurrence {
                occurred_on: date(2025, 11, 2),
                kind: OccurrenceKind::Incident,
                severity: SeverityLevel::Low,
                description: "bird strike on climb-out, no damage".to_string(),
            }],
        },
    }
}

#[test]
fn registration_scores_both_pipelines_and_assigns_a_cycle() {
    let service = service();

    let record = service.register(regional_snapshot()).expect("registers");

    let score = record.score.as_ref().expect("rbs score present");
    assert_eq!(score.exposure_level.letter(), 'B');
    assert_eq!(score.final_risk_category, "B5");
    assert_eq!(score.suggested_cycle_months, 6);

    // 2*2 + 2*2 + 1 = 9, inside the LOW band.
    let legacy = record.legacy_assessment.expect("legacy score present");
    assert_eq!(legacy.score, 9);
    assert_eq!(legacy.level, RiskLevel::Low);
}

#[test]
fn snapshot_growth_moves_the_operator_to_a_shorter_cycle_band() {
    let service = service();
    let record = service.register(regional_snapshot()).expect("registers");
    let operator_id = record.snapshot.operator_id.clone();
    let before = record.score.expect("scored at registration");

    let mut grown = regional_snapshot();
    grown.complexity = ComplexityFactors {
        annual_flight_count: 180_000,
        employee_count: 12_000,
        aircraft_count: 140,
        aircraft_model_count: 9,
        destination_count: 110,
        international_ops: true,
        avg_fleet_age_years: 8.5,
        domestic_base_count: 12,
    };
    grown.legacy.occurrences.push(Occurrence {
        occurred_on: date(2026, 2, 9),
        kind: OccurrenceKind::SeriousIncident,
        severity: SeverityLevel::High,
        description: "rejected takeoff above 100 knots".to_string(),
    });

    let after = service
        .update_snapshot(&operator_id, grown)
        .expect("updates and rescores");

    assert!(after.exposure_score > before.exposure_score);
    assert_eq!(after.exposure_level.letter(), 'E');
    assert_eq!(after.final_risk_category, "E5");
    assert_eq!(after.suggested_cycle_months, 6);

    let stored = service.get(&operator_id).expect("fetches");
    assert_eq!(stored.snapshot.operator_id, operator_id);
    assert_eq!(stored.score, Some(after));
    // 9 + 5 = 14, now MEDIUM.
    assert_eq!(
        stored.legacy_assessment.expect("legacy score").level,
        RiskLevel::Medium
    );
}

#[test]
fn finding_lifecycle_runs_end_to_end() {
    let service = service();
    let record = service.register(regional_snapshot()).expect("registers");
    let operator_id = record.snapshot.operator_id.clone();

    let finding = service
        .open_finding(
            &operator_id,
            NewFinding {
                category: FindingCategory::Level3,
                created_on: date(2026, 1, 10),
                narrative: FindingNarrative {
                    finding: "fatigue risk program audit trail incomplete".to_string(),
                    ..FindingNarrative::default()
                },
            },
        )
        .expect("opens");
    assert_eq!(finding.target_completion_date, date(2026, 3, 11));

    let view = service.get(&operator_id).expect("fetches").status_view();
    assert_eq!(view.open_findings, 1);

    let amended = service
        .amend_finding(
            &operator_id,
            &finding.finding_id,
            FindingNarrative {
                finding: "fatigue risk program audit trail incomplete".to_string(),
                root_cause_analysis: "records migration dropped sign-off fields".to_string(),
                corrective_action_plan: "re-import sign-offs and add schema check".to_string(),
                corrective_action_taken: String::new(),
            },
        )
        .expect("amends while open");
    assert!(!amended.narrative.root_cause_analysis.is_empty());

    let completed = service
        .complete_finding(&operator_id, &finding.finding_id, date(2026, 2, 20))
        .expect("completes");
    assert!(completed.completed);
    assert_eq!(completed.actual_completion_date, Some(date(2026, 2, 20)));

    let view = service.get(&operator_id).expect("fetches").status_view();
    assert_eq!(view.open_findings, 0);

    // Closed findings are immutable.
    assert!(service
        .complete_finding(&operator_id, &finding.finding_id, date(2026, 2, 21))
        .is_err());
    assert!(service
        .amend_finding(&operator_id, &finding.finding_id, FindingNarrative::default())
        .is_err());
}
