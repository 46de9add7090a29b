use serde::{Deserialize, Serialize};
use std::fmt;
use time::{Date, PrimitiveDateTime};
use uuid::Uuid;

/// Level of the work hierarchy. Task ⊆ SubProject ⊆ Project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Project,
    SubProject,
    Task,
}

impl Level {
    /// The level whose window contains this one, `None` at the root.
    pub fn parent(self) -> Option<Level> {
        match self {
            Level::Project => None,
            Level::SubProject => Some(Level::Project),
            Level::Task => Some(Level::SubProject),
        }
    }

    pub fn requires_start_date(self) -> bool {
        !matches!(self, Level::Task)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Project => write!(f, "project"),
            Level::SubProject => write!(f, "sub_project"),
            Level::Task => write!(f, "task"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemRef {
    pub level: Level,
    pub id: Uuid,
}

impl WorkItemRef {
    pub fn new(level: Level, id: Uuid) -> Self {
        Self { level, id }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateWindow {
    #[serde(default)]
    pub start: Option<Date>,
    pub end: Date,
}

impl DateWindow {
    pub fn new(start: Date, end: Date) -> Self {
        Self {
            start: Some(start),
            end,
        }
    }

    pub fn ending(end: Date) -> Self {
        Self { start: None, end }
    }

    pub fn is_inverted(&self) -> bool {
        self.start.is_some_and(|start| start > self.end)
    }
}

/// Scheduling window granted to one company for one work item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateAssignment {
    pub id: Uuid,
    pub level: Level,
    pub item_id: Uuid,
    pub company_id: Uuid,
    pub window: DateWindow,
    pub is_flexible: bool,
    pub created_by: String,
    pub updated_by: String,
    pub created_at: PrimitiveDateTime,
    pub updated_at: PrimitiveDateTime,
}

impl DateAssignment {
    pub fn item(&self) -> WorkItemRef {
        WorkItemRef::new(self.level, self.item_id)
    }
}

/// Externally owned state of a work item as seen by the compliance read path.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSnapshot {
    pub item: WorkItemRef,
    pub project_id: Uuid,
    pub progress: u8,
    pub completed: bool,
    pub completed_on: Option<Date>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    OnTime,
    Upcoming,
    Overdue,
    Critical,
    NoDate,
    Completed,
}

impl ComplianceStatus {
    pub fn is_compliant(self) -> bool {
        matches!(self, ComplianceStatus::OnTime | ComplianceStatus::Completed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceRecord {
    pub level: Level,
    pub item_id: Uuid,
    pub company_id: Uuid,
    pub project_id: Option<Uuid>,
    pub window: Option<DateWindow>,
    pub status: ComplianceStatus,
    /// Positive when late, negative when finished early.
    pub delay_days: i64,
    pub progress: u8,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceStats {
    pub total: usize,
    pub compliant_count: usize,
    pub delayed_count: usize,
    pub critical_count: usize,
    pub compliance_rate: u32,
    pub average_delay: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectComplianceStats {
    pub project_id: Uuid,
    #[serde(flatten)]
    pub stats: ComplianceStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyComplianceStats {
    pub company_id: Uuid,
    #[serde(flatten)]
    pub stats: ComplianceStats,
}

/// Why a write was refused. Serialized as the bare variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReasonCode {
    InvertedRange,
    MissingStartDate,
    UnknownItem,
    NoParentAssignment,
    OutsideParentWindow,
    NotFound,
    StorageError,
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReasonCode::InvertedRange => "InvertedRange",
            ReasonCode::MissingStartDate => "MissingStartDate",
            ReasonCode::UnknownItem => "UnknownItem",
            ReasonCode::NoParentAssignment => "NoParentAssignment",
            ReasonCode::OutsideParentWindow => "OutsideParentWindow",
            ReasonCode::NotFound => "NotFound",
            ReasonCode::StorageError => "StorageError",
        };

        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub reason: ReasonCode,
    pub suggestion: Option<DateWindow>,
}

impl Rejection {
    pub fn new(reason: ReasonCode) -> Self {
        Self {
            reason,
            suggestion: None,
        }
    }

    pub fn with_suggestion(reason: ReasonCode, suggestion: DateWindow) -> Self {
        Self {
            reason,
            suggestion: Some(suggestion),
        }
    }
}

//------------------------------------------------------------------------------
// Bulk outcomes
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct BulkSuccess {
    pub item_id: Uuid,
    pub company_id: Uuid,
    pub assignment: DateAssignment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BulkFailure {
    pub item_id: Uuid,
    pub company_id: Uuid,
    pub reason: ReasonCode,
    pub suggestion: Option<DateWindow>,
}

/// Outcome of a bulk operation. Pairs are independent and unordered.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BulkResult {
    pub successes: Vec<BulkSuccess>,
    pub failures: Vec<BulkFailure>,
}

impl BulkResult {
    pub fn total(&self) -> usize {
        self.successes.len() + self.failures.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_level_parent_chain() {
        assert_eq!(Some(Level::SubProject), Level::Task.parent());
        assert_eq!(Some(Level::Project), Level::SubProject.parent());
        assert_eq!(None, Level::Project.parent());
    }

    #[test]
    fn test_window_inverted() {
        assert!(DateWindow::new(date!(2025 - 02 - 01), date!(2025 - 01 - 01)).is_inverted());
        assert!(!DateWindow::new(date!(2025 - 01 - 01), date!(2025 - 01 - 01)).is_inverted());
        assert!(!DateWindow::ending(date!(2025 - 01 - 01)).is_inverted());
    }

    #[test]
    fn test_level_serializes_snake_case() {
        let value = serde_json::to_value(Level::SubProject).unwrap();
        assert_eq!("sub_project", value);
    }
}
