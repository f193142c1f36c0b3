//! Surveillance findings and their remediation deadlines.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for surveillance findings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FindingId(pub String);

/// Finding category; each level carries a fixed remediation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FindingCategory {
    Level1,
    Level2,
    Level3,
}

impl FindingCategory {
    /// Calendar days allowed between creation and target completion.
    pub const fn remediation_days(self) -> i64 {
        match self {
            FindingCategory::Level1 => 15,
            FindingCategory::Level2 => 30,
            FindingCategory::Level3 => 60,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FindingCategory::Level1 => "Level 1 (Non-Compliance)",
            FindingCategory::Level2 => "Level 2 (Non-Conformance)",
            FindingCategory::Level3 => "Level 3 (Non-Adherence)",
        }
    }
}

/// Pure calendar arithmetic: creation date plus the category's window,
/// rolling over month and year boundaries. Date-only, so the caller's
/// timezone cannot shift the result.
pub fn target_completion_date(category: FindingCategory, created_on: NaiveDate) -> NaiveDate {
    created_on + Duration::days(category.remediation_days())
}

/// Narrative fields attached to a finding. Opaque text; never interpreted
/// by the engine. Requests may supply any subset of the fields; the rest
/// default to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FindingNarrative {
    pub finding: String,
    pub root_cause_analysis: String,
    pub corrective_action_plan: String,
    pub corrective_action_taken: String,
}

/// Errors from finding lifecycle transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FindingError {
    #[error("finding {0} is already completed and cannot be modified")]
    AlreadyCompleted(String),
}

/// A recorded surveillance finding.
///
/// Category and creation date are fixed at birth and the target date is
/// computed once, never recomputed. Completion is one-way: the actual
/// completion date is set exactly when the flag transitions to true, and a
/// completed finding accepts no further changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveillanceFinding {
    pub finding_id: FindingId,
    pub category: FindingCategory,
    pub created_on: NaiveDate,
    pub narrative: FindingNarrative,
    pub target_completion_date: NaiveDate,
    pub completed: bool,
    pub actual_completion_date: Option<NaiveDate>,
}

impl SurveillanceFinding {
    pub fn open(
        finding_id: FindingId,
        category: FindingCategory,
        created_on: NaiveDate,
        narrative: FindingNarrative,
    ) -> Self {
        Self {
            finding_id,
            category,
            created_on,
            narrative,
            target_completion_date: target_completion_date(category, created_on),
            completed: false,
            actual_completion_date: None,
        }
    }

    /// Mark the finding complete. One-way: re-completion is rejected and
    /// nothing ever clears the actual completion date.
    pub fn complete(&mut self, completed_on: NaiveDate) -> Result<(), FindingError> {
        if self.completed {
            return Err(FindingError::AlreadyCompleted(self.finding_id.0.clone()));
        }
        self.completed = true;
        self.actual_completion_date = Some(completed_on);
        Ok(())
    }

    /// Replace the narrative fields. Only open findings can be amended.
    pub fn amend(&mut self, narrative: FindingNarrative) -> Result<(), FindingError> {
        if self.completed {
            return Err(FindingError::AlreadyCompleted(self.finding_id.0.clone()));
        }
        self.narrative = narrative;
        Ok(())
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && today > self.target_completion_date
    }
}
