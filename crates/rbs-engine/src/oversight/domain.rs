use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for certified operators. The default (empty) id marks
/// a snapshot that has not been registered yet; the service assigns a real
/// one on registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperatorId(pub String);

/// Ordinal exposure classification derived from operational complexity alone.
/// `A` is the least exposed, `E` the most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExposureLevel {
    A,
    B,
    C,
    D,
    E,
}

impl ExposureLevel {
    pub const ALL: [ExposureLevel; 5] = [
        ExposureLevel::A,
        ExposureLevel::B,
        ExposureLevel::C,
        ExposureLevel::D,
        ExposureLevel::E,
    ];

    pub const fn letter(self) -> char {
        match self {
            ExposureLevel::A => 'A',
            ExposureLevel::B => 'B',
            ExposureLevel::C => 'C',
            ExposureLevel::D => 'D',
            ExposureLevel::E => 'E',
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            ExposureLevel::A => 0,
            ExposureLevel::B => 1,
            ExposureLevel::C => 2,
            ExposureLevel::D => 3,
            ExposureLevel::E => 4,
        }
    }
}

/// Ordinal performance classification derived from the overall performance
/// score. The scale is inverted: level 5 is the worst, level 1 the best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskIndicatorLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskIndicatorLevel {
    pub const ALL: [RiskIndicatorLevel; 5] = [
        RiskIndicatorLevel::VeryLow,
        RiskIndicatorLevel::Low,
        RiskIndicatorLevel::Medium,
        RiskIndicatorLevel::High,
        RiskIndicatorLevel::VeryHigh,
    ];

    /// The 1..=5 digit used in the final risk category key.
    pub const fn digit(self) -> u8 {
        match self {
            RiskIndicatorLevel::VeryLow => 1,
            RiskIndicatorLevel::Low => 2,
            RiskIndicatorLevel::Medium => 3,
            RiskIndicatorLevel::High => 4,
            RiskIndicatorLevel::VeryHigh => 5,
        }
    }

    /// Inverse of [`digit`](Self::digit); `None` outside 1..=5.
    pub const fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            1 => Some(RiskIndicatorLevel::VeryLow),
            2 => Some(RiskIndicatorLevel::Low),
            3 => Some(RiskIndicatorLevel::Medium),
            4 => Some(RiskIndicatorLevel::High),
            5 => Some(RiskIndicatorLevel::VeryHigh),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskIndicatorLevel::VeryLow => "very_low",
            RiskIndicatorLevel::Low => "low",
            RiskIndicatorLevel::Medium => "medium",
            RiskIndicatorLevel::High => "high",
            RiskIndicatorLevel::VeryHigh => "very_high",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self.digit() as usize - 1
    }
}

/// Legacy four-band classification of the weighted occurrence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

/// Severity tag on a recorded occurrence; each carries a fixed weight in the
/// legacy score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeverityLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl SeverityLevel {
    pub const fn weight(self) -> u32 {
        match self {
            SeverityLevel::Low => 1,
            SeverityLevel::Medium => 3,
            SeverityLevel::High => 5,
            SeverityLevel::Critical => 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OccurrenceKind {
    Accident,
    SeriousIncident,
    Incident,
    SafetyReport,
    ServiceDifficultyReport,
    Other,
}

/// A dated, typed, severity-tagged safety occurrence feeding the legacy score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    pub occurred_on: NaiveDate,
    pub kind: OccurrenceKind,
    pub severity: SeverityLevel,
    pub description: String,
}

/// Inputs to the legacy risk score, retained for comparison with the RBS
/// pipeline. Both ratings use a 1..=5 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyRiskFactors {
    pub aircraft_frequency: u8,
    pub environmental_complexity: u8,
    pub occurrences: Vec<Occurrence>,
}

/// Operational complexity attributes driving the exposure classification.
/// All counts are structurally non-negative; `avg_fleet_age_years` is the
/// only field the classifier must validate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityFactors {
    pub annual_flight_count: u32,
    pub employee_count: u32,
    pub aircraft_count: u32,
    pub aircraft_model_count: u32,
    pub destination_count: u32,
    pub international_ops: bool,
    pub avg_fleet_age_years: f64,
    pub domestic_base_count: u32,
}

/// Compliance finding counts partitioned by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceFindingCounts {
    pub non_compliance: u32,
    pub non_conformance: u32,
    pub non_adherence: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceData {
    pub findings: ComplianceFindingCounts,
    pub total_checklist_items: u32,
}

/// Safety deviation counts partitioned by severity, normalized against
/// flight cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviationData {
    pub accident_count: u32,
    pub serious_incident_count: u32,
    pub incident_count: u32,
    pub total_flight_cycles: u32,
}

/// Corrective-action history. The four graduated stage counts feed the
/// improvement factor; the two applied totals are its denominator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementData {
    pub total_deviations_addressed: u32,
    pub total_findings_addressed: u32,
    pub root_cause_identified: u32,
    pub hazard_identified: u32,
    pub risk_assessed: u32,
    pub risk_mitigated: u32,
    pub corrective_actions_on_findings: u32,
    pub corrective_actions_on_deviations: u32,
}

/// Read-only input snapshot of an operator's raw factors. The engine never
/// mutates it; derived fields live in [`ScoreResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorSnapshot {
    #[serde(default)]
    pub operator_id: OperatorId,
    pub name: String,
    pub aoc_number: String,
    pub complexity: ComplexityFactors,
    pub compliance: ComplianceData,
    pub deviations: DeviationData,
    pub improvement: ImprovementData,
    pub legacy: LegacyRiskFactors,
}

/// Derived risk fields, produced wholesale by the scoring engine and replaced
/// atomically on recomputation. Callers never patch individual fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub exposure_score: f64,
    pub exposure_level: ExposureLevel,
    pub compliance_factor_score: f64,
    pub deviation_factor_score: f64,
    pub improvement_factor_score: f64,
    pub overall_performance_score: f64,
    /// Serialized as the 1..=5 digit so the wire form matches the status
    /// view and the final category key.
    #[serde(with = "indicator_digit")]
    pub risk_indicator_level: RiskIndicatorLevel,
    pub final_risk_category: String,
    pub suggested_cycle_months: u8,
}

mod indicator_digit {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::RiskIndicatorLevel;

    pub fn serialize<S>(level: &RiskIndicatorLevel, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(level.digit())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<RiskIndicatorLevel, D::Error>
    where
        D: Deserializer<'de>,
    {
        let digit = u8::deserialize(deserializer)?;
        RiskIndicatorLevel::from_digit(digit).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "risk indicator digit must be between 1 and 5, got {digit}"
            ))
        })
    }
}

impl ScoreResult {
    /// The letter+digit key ("A1".."E5") combining both classifications.
    pub fn category_key(exposure: ExposureLevel, indicator: RiskIndicatorLevel) -> String {
        format!("{}{}", exposure.letter(), indicator.digit())
    }
}
