use crate::domain::schedule::{DateAssignment, DateWindow, ItemSnapshot, Level, WorkItemRef};
use sqlx::FromRow;
use time::{Date, PrimitiveDateTime};
use uuid::Uuid;

#[derive(sqlx::Type, Clone, Copy, Debug, PartialEq, Eq)]
#[sqlx(type_name = "work_level", rename_all = "snake_case")]
pub enum WorkLevel {
    Project,
    SubProject,
    Task,
}

impl From<Level> for WorkLevel {
    fn from(value: Level) -> Self {
        match value {
            Level::Project => WorkLevel::Project,
            Level::SubProject => WorkLevel::SubProject,
            Level::Task => WorkLevel::Task,
        }
    }
}

impl From<WorkLevel> for Level {
    fn from(value: WorkLevel) -> Self {
        match value {
            WorkLevel::Project => Level::Project,
            WorkLevel::SubProject => Level::SubProject,
            WorkLevel::Task => Level::Task,
        }
    }
}

#[derive(FromRow, Clone)]
pub struct DateAssignmentRow {
    pub id: Uuid,
    pub level: WorkLevel,
    pub item_id: Uuid,
    pub company_id: Uuid,
    pub start_date: Option<Date>,
    pub end_date: Date,
    pub is_flexible: bool,
    pub created_by: String,
    pub updated_by: String,
    pub created_at: PrimitiveDateTime,
    pub updated_at: PrimitiveDateTime,
}

impl From<DateAssignmentRow> for DateAssignment {
    fn from(value: DateAssignmentRow) -> Self {
        Self {
            id: value.id,
            level: value.level.into(),
            item_id: value.item_id,
            company_id: value.company_id,
            window: DateWindow {
                start: value.start_date,
                end: value.end_date,
            },
            is_flexible: value.is_flexible,
            created_by: value.created_by,
            updated_by: value.updated_by,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

pub struct DateAssignmentRowList(pub Vec<DateAssignmentRow>);

impl From<DateAssignmentRowList> for Vec<DateAssignment> {
    fn from(value: DateAssignmentRowList) -> Self {
        value.0.into_iter().map(|row| row.into()).collect()
    }
}

#[derive(FromRow, Clone)]
pub struct ParentRow {
    pub parent_id: Uuid,
}

#[derive(FromRow, Clone)]
pub struct ItemStateRow {
    pub id: Uuid,
    pub project_id: Uuid,
    pub progress: i16,
    pub status: String,
    pub completed_at: Option<PrimitiveDateTime>,
}

impl ItemStateRow {
    pub fn into_snapshot(self, level: Level) -> ItemSnapshot {
        ItemSnapshot {
            item: WorkItemRef::new(level, self.id),
            project_id: self.project_id,
            progress: self.progress.clamp(0, 100) as u8,
            completed: self.status == "completed",
            completed_on: self.completed_at.map(|at| at.date()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn state_row(progress: i16, status: &str) -> ItemStateRow {
        ItemStateRow {
            id: Uuid::from_u128(1),
            project_id: Uuid::from_u128(2),
            progress,
            status: status.to_string(),
            completed_at: Some(datetime!(2025 - 03 - 04 17:30)),
        }
    }

    #[test]
    fn test_level_round_trip() {
        for level in [Level::Project, Level::SubProject, Level::Task] {
            assert_eq!(level, Level::from(WorkLevel::from(level)));
        }
    }

    #[test]
    fn test_snapshot_clamps_progress() {
        assert_eq!(100, state_row(140, "active").into_snapshot(Level::Task).progress);
        assert_eq!(0, state_row(-5, "active").into_snapshot(Level::Task).progress);
    }

    #[test]
    fn test_snapshot_completion() {
        let snapshot = state_row(100, "completed").into_snapshot(Level::SubProject);

        assert!(snapshot.completed);
        assert_eq!(Some(datetime!(2025 - 03 - 04 0:00).date()), snapshot.completed_on);
        assert_eq!(Level::SubProject, snapshot.item.level);
    }
}
