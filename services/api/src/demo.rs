use crate::infra::InMemoryOperatorRepository;
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use rbs_engine::error::AppError;
use rbs_engine::oversight::{
    score_legacy, ComplexityFactors, ComplianceData, ComplianceFindingCounts, DeviationData,
    FindingCategory, FindingNarrative, ImprovementData, LegacyRiskFactors, NewFinding, Occurrence,
    OccurrenceKind, OperatorId, OperatorRecord, OperatorSnapshot, OversightService, ScoringConfig,
    ScoringEngine, SeverityLevel,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Path to a JSON operator snapshot file
    pub(crate) input: PathBuf,
    /// Emit the full derived record as JSON instead of the summary lines
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reporting date for finding status (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.input)?;
    let snapshot: OperatorSnapshot = serde_json::from_str(&raw)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;

    let engine = ScoringEngine::new(ScoringConfig::default());
    let score = engine.score(&snapshot)?;
    let legacy = score_legacy(&snapshot.legacy, &engine.config().legacy_weights)?;

    if args.json {
        let payload = serde_json::json!({ "score": score, "legacy": legacy });
        match serde_json::to_string_pretty(&payload) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("derived record unavailable: {err}"),
        }
        return Ok(());
    }

    println!("Assessment for {} ({})", snapshot.name, snapshot.aoc_number);
    println!(
        "- Exposure: {:.2} -> band {}",
        score.exposure_score,
        score.exposure_level.letter()
    );
    println!(
        "- Performance: C {:.4} | D {:.4} | I {:.4} | overall {:.4}",
        score.compliance_factor_score,
        score.deviation_factor_score,
        score.improvement_factor_score,
        score.overall_performance_score
    );
    println!(
        "- Risk category {} -> surveillance every {} months",
        score.final_risk_category, score.suggested_cycle_months
    );
    println!(
        "- Legacy score {} ({})",
        legacy.score,
        legacy.level.label()
    );

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());

    println!("Surveillance oversight demo (as of {as_of})");
    let repository = Arc::new(InMemoryOperatorRepository::default());
    let service = OversightService::new(repository, ScoringConfig::default());

    let mut operator_ids = Vec::new();
    for snapshot in seeded_operators() {
        let record = match service.register(snapshot) {
            Ok(record) => record,
            Err(err) => {
                println!("  registration failed: {err}");
                return Ok(());
            }
        };
        render_operator(&record);
        operator_ids.push(record.snapshot.operator_id.clone());
    }

    let Some(regional_id) = operator_ids.get(1).cloned() else {
        return Ok(());
    };

    println!("\nFinding lifecycle");
    let finding = match service.open_finding(
        &regional_id,
        NewFinding {
            category: FindingCategory::Level2,
            created_on: as_of - Duration::days(45),
            narrative: FindingNarrative {
                finding: "ramp inspection: unserviceable emergency lighting".to_string(),
                ..FindingNarrative::default()
            },
        },
    ) {
        Ok(finding) => finding,
        Err(err) => {
            println!("  opening finding failed: {err}");
            return Ok(());
        }
    };
    println!(
        "- Opened {} ({}) -> target {}{}",
        finding.finding_id.0,
        finding.category.label(),
        finding.target_completion_date,
        if finding.is_overdue(as_of) {
            " [OVERDUE]"
        } else {
            ""
        }
    );

    match service.complete_finding(&regional_id, &finding.finding_id, as_of) {
        Ok(completed) => println!(
            "- Completed {} on {}",
            completed.finding_id.0,
            as_of
        ),
        Err(err) => println!("  completing finding failed: {err}"),
    }

    println!("\nRegister after completion");
    match service.list() {
        Ok(records) => {
            for record in records {
                let view = record.status_view();
                println!(
                    "- {} | {} | category {} | {} open finding(s)",
                    view.operator_id.0,
                    view.name,
                    view.final_risk_category.as_deref().unwrap_or("unscored"),
                    view.open_findings
                );
            }
        }
        Err(err) => println!("  listing failed: {err}"),
    }

    Ok(())
}

fn render_operator(record: &OperatorRecord) {
    let OperatorId(id) = &record.snapshot.operator_id;
    println!("\n{} | {} ({})", id, record.snapshot.name, record.snapshot.aoc_number);

    if let Some(score) = &record.score {
        println!(
            "- Exposure {:.2} (band {}) | indicator level {} | category {} | cycle {} months",
            score.exposure_score,
            score.exposure_level.letter(),
            score.risk_indicator_level.digit(),
            score.final_risk_category,
            score.suggested_cycle_months
        );
    }
    if let Some(legacy) = record.legacy_assessment {
        println!("- Legacy score {} ({})", legacy.score, legacy.level.label());
    }
}

fn seeded_operators() -> Vec<OperatorSnapshot> {
    vec![
        operator_snapshot(
            "Stillwater Air",
            "AOC-1107",
            ComplexityFactors {
                annual_flight_count: 1_200,
                employee_count: 40,
                aircraft_count: 3,
                aircraft_model_count: 1,
                destination_count: 5,
                international_ops: false,
                avg_fleet_age_years: 11.0,
                domestic_base_count: 1,
            },
            LegacyRiskFactors {
                aircraft_frequency: 1,
                environmental_complexity: 2,
                occurrences: Vec::new(),
            },
        ),
        operator_snapshot(
            "Archipelago Air",
            "AOC-2041",
            ComplexityFactors {
                annual_flight_count: 8_000,
                employee_count: 250,
                aircraft_count: 6,
                aircraft_model_count: 2,
                destination_count: 12,
                international_ops: false,
                avg_fleet_age_years: 14.0,
                domestic_base_count: 2,
            },
            LegacyRiskFactors {
                aircraft_frequency: 2,
                environmental_complexity: 3,
                occurrences: vec![Occurrence {
                    occurred_on: NaiveDate::from_ymd_opt(2025, 11, 2)
                        .unwrap_or_default(),
                    kind: OccurrenceKind::Incident,
                    severity: SeverityLevel::Low,
                    description: "bird strike on climb-out, no damage".to_string(),
                }],
            },
        ),
        operator_snapshot(
            "Meridian Jet",
            "AOC-3300",
            ComplexityFactors {
                annual_flight_count: 180_000,
                employee_count: 12_000,
                aircraft_count: 140,
                aircraft_model_count: 9,
                destination_count: 110,
                international_ops: true,
                avg_fleet_age_years: 8.5,
                domestic_base_count: 12,
            },
            LegacyRiskFactors {
                aircraft_frequency: 5,
                environmental_complexity: 4,
                occurrences: vec![
                    Occurrence {
                        occurred_on: NaiveDate::from_ymd_opt(2025, 6, 18)
                            .unwrap_or_default(),
                        kind: OccurrenceKind::SeriousIncident,
                        severity: SeverityLevel::High,
                        description: "rejected takeoff above 100 knots".to_string(),
                    },
                    Occurrence {
                        occurred_on: NaiveDate::from_ymd_opt(2026, 1, 4)
                            .unwrap_or_default(),
                        kind: OccurrenceKind::Incident,
                        severity: SeverityLevel::Medium,
                        description: "cabin pressurization fluctuation".to_string(),
                    },
                ],
            },
        ),
    ]
}

fn operator_snapshot(
    name: &str,
    aoc_number: &str,
    complexity: ComplexityFactors,
    legacy: LegacyRiskFactors,
) -> OperatorSnapshot {
    let cycles = (complexity.annual_flight_count / 2).max(1);
    OperatorSnapshot {
        operator_id: OperatorId::default(),
        name: name.to_string(),
        aoc_number: aoc_number.to_string(),
        complexity,
        compliance: ComplianceData {
            findings: ComplianceFindingCounts {
                non_compliance: 0,
                non_conformance: 1,
                non_adherence: 2,
            },
            total_checklist_items: 100,
        },
        deviations: DeviationData {
            accident_count: 0,
            serious_incident_count: 0,
            incident_count: 1,
            total_flight_cycles: cycles,
        },
        improvement: ImprovementData {
            total_deviations_addressed: 1,
            total_findings_addressed: 3,
            root_cause_identified: 2,
            hazard_identified: 1,
            risk_assessed: 1,
            risk_mitigated: 1,
            corrective_actions_on_findings: 3,
            corrective_actions_on_deviations: 1,
        },
        legacy,
    }
}
