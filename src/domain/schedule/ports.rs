use crate::domain::schedule::{
    BulkResult, CompanyComplianceStats, ComplianceRecord, ComplianceStats, DateAssignment,
    DateWindow, ItemSnapshot, Level, ProjectComplianceStats, Rejection, WorkItemRef,
};
use crate::outbound::db::error::Error as DatabaseError;
use async_trait::async_trait;
use thiserror::Error;
use time::Date;
use uuid::Uuid;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait ScheduleService: Send + Sync {
    async fn assign(&self, params: AssignParams) -> Result<DateAssignment, AssignError>;
    async fn remove(&self, params: RemoveParams) -> Result<DateAssignment, RemoveError>;
    async fn bulk_assign(&self, params: BulkAssignParams) -> BulkResult;
    async fn bulk_remove(&self, params: BulkRemoveParams) -> BulkResult;
    async fn get_assignments(
        &self,
        params: GetAssignmentsParams,
    ) -> Result<Vec<DateAssignment>, QueryError>;
    async fn query_compliance(
        &self,
        params: ComplianceQueryParams,
    ) -> Result<ComplianceReport, QueryError>;
}

//------------------------------------------------------------------------------
// Assign
//------------------------------------------------------------------------------

pub struct AssignParams {
    pub level: Level,
    pub item_id: Uuid,
    pub company_id: Uuid,
    pub window: DateWindow,
    pub is_flexible: bool,
    pub actor: String,
}

#[derive(Debug, Error)]
pub enum AssignError {
    #[error("assignment rejected: {}", .0.reason)]
    Rejected(Rejection),

    #[error("failed to assign dates because of database error")]
    DatabaseError(#[from] DatabaseError),
}

//------------------------------------------------------------------------------
// Remove
//------------------------------------------------------------------------------

pub struct RemoveParams {
    pub level: Level,
    pub item_id: Uuid,
    pub company_id: Uuid,
}

#[derive(Debug, Error)]
pub enum RemoveError {
    #[error("no dates are assigned to that item for that company")]
    NotFound,

    #[error("failed to remove dates because of database error")]
    DatabaseError(#[from] DatabaseError),
}

//------------------------------------------------------------------------------
// Bulk
//------------------------------------------------------------------------------

pub struct BulkAssignParams {
    pub items: Vec<WorkItemRef>,
    pub company_ids: Vec<Uuid>,
    pub window: DateWindow,
    pub is_flexible: bool,
    pub actor: String,
}

pub struct BulkRemoveParams {
    pub items: Vec<WorkItemRef>,
    pub company_ids: Vec<Uuid>,
}

//------------------------------------------------------------------------------
// Reads
//------------------------------------------------------------------------------

#[derive(Default)]
pub struct GetAssignmentsParams {
    pub level: Option<Level>,
    pub item_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
}

pub struct ComplianceQueryParams {
    pub level: Option<Level>,
    pub item_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    /// Keep assignments that ended at most this many days before `today`.
    pub time_range_days: Option<u32>,
    pub today: Date,
}

pub struct ComplianceReport {
    pub records: Vec<ComplianceRecord>,
    pub summary: ComplianceStats,
    pub by_project: Vec<ProjectComplianceStats>,
    pub by_company: Vec<CompanyComplianceStats>,
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("an item id needs a level")]
    MissingLevel,

    #[error("failed to read assignments because of database error")]
    DatabaseError(#[from] DatabaseError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Database Repository
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait AssignmentRepository: Send + Sync + 'static {
    async fn upsert_assignment(
        &self,
        params: UpsertAssignmentDBParams,
    ) -> Result<DateAssignment, DatabaseError>;

    async fn remove_assignment(
        &self,
        params: AssignmentKeyDBParams,
    ) -> Result<Option<DateAssignment>, DatabaseError>;

    async fn find_assignment(
        &self,
        params: AssignmentKeyDBParams,
    ) -> Result<Option<DateAssignment>, DatabaseError>;

    async fn list_assignments_by_item(
        &self,
        params: ListByItemDBParams,
    ) -> Result<Vec<DateAssignment>, DatabaseError>;

    async fn list_assignments_by_company(
        &self,
        params: ListByCompanyDBParams,
    ) -> Result<Vec<DateAssignment>, DatabaseError>;

    async fn list_assignments(
        &self,
        params: ListAssignmentsDBParams,
    ) -> Result<Vec<DateAssignment>, DatabaseError>;
}

/// Read access to the externally owned work hierarchy.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait WorkItemRepository: Send + Sync + 'static {
    /// `None` for projects and for items that do not exist.
    async fn find_parent(
        &self,
        params: FindParentDBParams,
    ) -> Result<Option<WorkItemRef>, DatabaseError>;

    /// Unknown items are omitted from the result.
    async fn get_item_snapshots(
        &self,
        params: GetItemSnapshotsDBParams,
    ) -> Result<Vec<ItemSnapshot>, DatabaseError>;
}

//------------------------------------------------------------------------------
// Upsert Assignment
//------------------------------------------------------------------------------

pub struct UpsertAssignmentDBParams {
    pub level: Level,
    pub item_id: Uuid,
    pub company_id: Uuid,
    pub window: DateWindow,
    pub is_flexible: bool,
    pub actor: String,
}

//------------------------------------------------------------------------------
// Find / Remove Assignment
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssignmentKeyDBParams {
    pub level: Level,
    pub item_id: Uuid,
    pub company_id: Uuid,
}

//------------------------------------------------------------------------------
// List Assignments
//------------------------------------------------------------------------------

pub struct ListByItemDBParams {
    pub level: Level,
    pub item_id: Uuid,
}

pub struct ListByCompanyDBParams {
    pub company_id: Uuid,
    pub level: Option<Level>,
}

pub struct ListAssignmentsDBParams {
    pub level: Option<Level>,
}

//------------------------------------------------------------------------------
// Work Items
//------------------------------------------------------------------------------

pub struct FindParentDBParams {
    pub item: WorkItemRef,
}

pub struct GetItemSnapshotsDBParams {
    pub items: Vec<WorkItemRef>,
}
