use std::sync::Arc;

use chrono::NaiveDate;

use super::common::*;
use crate::oversight::domain::SeverityLevel;
use crate::oversight::findings::{FindingCategory, FindingId, FindingNarrative};
use crate::oversight::repository::RepositoryError;
use crate::oversight::service::{NewFinding, OversightService, ServiceError};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn new_finding(created_on: NaiveDate) -> NewFinding {
    NewFinding {
        category: FindingCategory::Level2,
        created_on,
        narrative: FindingNarrative {
            finding: "incomplete maintenance release records".to_string(),
            ..FindingNarrative::default()
        },
    }
}

#[test]
fn register_assigns_an_id_and_scores_both_pipelines() {
    let (service, _repository) = build_service();

    let record = service
        .register(snapshot("Archipelago Air", regional_complexity()))
        .expect("registers");

    assert!(record.snapshot.operator_id.0.starts_with("op-"));
    let score = record.score.as_ref().expect("rbs score present");
    assert_eq!(score.final_risk_category, "B5");
    let legacy = record.legacy_assessment.expect("legacy score present");
    assert_eq!(legacy.score, 4);

    let view = record.status_view();
    assert_eq!(view.final_risk_category.as_deref(), Some("B5"));
    assert_eq!(view.legacy_risk_level, Some("low"));
    assert_eq!(view.open_findings, 0);
}

#[test]
fn rescore_replaces_the_derived_record_wholesale() {
    let (service, repository) = build_service();
    let record = service
        .register(snapshot("Archipelago Air", regional_complexity()))
        .expect("registers");
    let operator_id = record.snapshot.operator_id.clone();
    let original_score = record.score.expect("scored at registration");

    // Mutate the stored snapshot behind the service's back, then rescore.
    {
        let mut guard = repository.records.lock().expect("mutex");
        let stored = guard.get_mut(&operator_id).expect("stored record");
        stored.snapshot.complexity = flag_carrier_complexity();
        stored
            .snapshot
            .legacy
            .occurrences
            .push(occurrence(SeverityLevel::Critical));
    }

    let rescored = service.rescore(&operator_id).expect("rescores");
    assert_ne!(rescored, original_score);
    assert_eq!(rescored.final_risk_category, "E5");

    let stored = service.get(&operator_id).expect("fetches");
    assert_eq!(stored.score.as_ref(), Some(&rescored));
    assert_eq!(stored.legacy_assessment.expect("legacy").score, 14);
}

#[test]
fn update_snapshot_keeps_the_operator_id() {
    let (service, _repository) = build_service();
    let record = service
        .register(snapshot("Archipelago Air", quiet_complexity()))
        .expect("registers");
    let operator_id = record.snapshot.operator_id.clone();

    let replacement = snapshot("Archipelago Air", flag_carrier_complexity());
    let score = service
        .update_snapshot(&operator_id, replacement)
        .expect("updates");
    assert_eq!(score.final_risk_category, "E5");

    let stored = service.get(&operator_id).expect("fetches");
    assert_eq!(stored.snapshot.operator_id, operator_id);
}

#[test]
fn invalid_fleet_age_is_rejected_before_anything_is_stored() {
    let (service, repository) = build_service();
    let mut bad = snapshot("Archipelago Air", regional_complexity());
    bad.complexity.avg_fleet_age_years = -3.0;

    let err = service.register(bad).expect_err("rejects");
    assert!(matches!(err, ServiceError::Scoring(_)));
    assert!(repository.records.lock().expect("mutex").is_empty());
}

#[test]
fn open_finding_computes_the_target_date() {
    let (service, _repository) = build_service();
    let record = service
        .register(snapshot("Meridian Jet", quiet_complexity()))
        .expect("registers");
    let operator_id = record.snapshot.operator_id.clone();

    let finding = service
        .open_finding(&operator_id, new_finding(date(2026, 1, 15)))
        .expect("opens");

    assert!(finding.finding_id.0.starts_with("fnd-"));
    assert_eq!(finding.target_completion_date, date(2026, 2, 14));

    let stored = service.get(&operator_id).expect("fetches");
    assert_eq!(stored.findings.len(), 1);
    assert_eq!(stored.status_view().open_findings, 1);
}

#[test]
fn complete_finding_is_one_way_through_the_service() {
    let (service, _repository) = build_service();
    let record = service
        .register(snapshot("Meridian Jet", quiet_complexity()))
        .expect("registers");
    let operator_id = record.snapshot.operator_id.clone();
    let finding = service
        .open_finding(&operator_id, new_finding(date(2026, 1, 15)))
        .expect("opens");

    let completed = service
        .complete_finding(&operator_id, &finding.finding_id, date(2026, 2, 1))
        .expect("completes");
    assert_eq!(completed.actual_completion_date, Some(date(2026, 2, 1)));

    let err = service
        .complete_finding(&operator_id, &finding.finding_id, date(2026, 2, 2))
        .expect_err("re-completion rejected");
    assert!(matches!(err, ServiceError::Finding(_)));
}

#[test]
fn unknown_finding_reports_a_distinct_error() {
    let (service, _repository) = build_service();
    let record = service
        .register(snapshot("Meridian Jet", quiet_complexity()))
        .expect("registers");
    let operator_id = record.snapshot.operator_id.clone();

    let err = service
        .complete_finding(
            &operator_id,
            &FindingId("fnd-999999".to_string()),
            date(2026, 2, 1),
        )
        .expect_err("unknown finding");
    assert!(matches!(err, ServiceError::UnknownFinding(_)));
}

#[test]
fn missing_operator_surfaces_not_found() {
    let (service, _repository) = build_service();
    let err = service
        .rescore(&crate::oversight::domain::OperatorId("op-000000".to_string()))
        .expect_err("unknown operator");
    assert!(matches!(
        err,
        ServiceError::Repository(RepositoryError::NotFound)
    ));
}

#[test]
fn repository_outage_propagates() {
    let service = OversightService::new(Arc::new(UnavailableRepository), scoring_config());
    let err = service
        .register(snapshot("Meridian Jet", quiet_complexity()))
        .expect_err("repository offline");
    assert!(matches!(
        err,
        ServiceError::Repository(RepositoryError::Unavailable(_))
    ));
}
