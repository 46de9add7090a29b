use crate::domain::schedule::compliance::{
    ComplianceThresholds, aggregate_by_company, aggregate_by_project, compute_status, summarize,
};
use crate::domain::schedule::containment::{check_range, validate};
use crate::domain::schedule::{
    AssignError, AssignParams, AssignmentKeyDBParams, AssignmentRepository, BulkAssignParams,
    BulkFailure, BulkRemoveParams, BulkResult, BulkSuccess, ComplianceQueryParams,
    ComplianceReport, DateAssignment, DateWindow, FindParentDBParams, GetAssignmentsParams,
    GetItemSnapshotsDBParams, ItemSnapshot, Level, ListAssignmentsDBParams,
    ListByCompanyDBParams, ListByItemDBParams, QueryError, ReasonCode, Rejection, RemoveError,
    RemoveParams, ScheduleService, UpsertAssignmentDBParams, WorkItemRef, WorkItemRepository,
};
use async_trait::async_trait;
use futures::{StreamExt, stream};
use std::collections::{HashMap, HashSet};
use time::Duration;
use uuid::Uuid;

pub const DEFAULT_BULK_CONCURRENCY: usize = 8;

type PairOutcome = (
    WorkItemRef,
    Uuid,
    Result<DateAssignment, (ReasonCode, Option<DateWindow>)>,
);

#[derive(Debug, Clone)]
pub struct Service<DB, ITEMS>
where
    DB: AssignmentRepository,
    ITEMS: WorkItemRepository,
{
    assignments: DB,
    items: ITEMS,
    thresholds: ComplianceThresholds,
    bulk_concurrency: usize,
}

impl<DB, ITEMS> Service<DB, ITEMS>
where
    DB: AssignmentRepository,
    ITEMS: WorkItemRepository,
{
    pub fn new(assignments: DB, items: ITEMS) -> Self {
        Self {
            assignments,
            items,
            thresholds: ComplianceThresholds::default(),
            bulk_concurrency: DEFAULT_BULK_CONCURRENCY,
        }
    }

    pub fn with_thresholds(mut self, thresholds: ComplianceThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_bulk_concurrency(mut self, bulk_concurrency: usize) -> Self {
        self.bulk_concurrency = bulk_concurrency.max(1);
        self
    }

    /// Window of the immediate parent's assignment for the same company.
    /// Grandparents are never consulted, so a missing parent row means no
    /// parent window even when an ancestor further up is assigned.
    ///
    /// The parent item is resolved for flexible writes too, so unknown items
    /// are rejected either way; only the assignment lookup is skipped.
    async fn parent_window(
        &self,
        item: WorkItemRef,
        company_id: Uuid,
        is_flexible: bool,
    ) -> Result<Option<DateWindow>, AssignError> {
        if item.level.parent().is_none() {
            return Ok(None);
        }

        let parent = self
            .items
            .find_parent(FindParentDBParams { item })
            .await?
            .ok_or(AssignError::Rejected(Rejection::new(ReasonCode::UnknownItem)))?;

        if is_flexible {
            return Ok(None);
        }

        let assignment = self
            .assignments
            .find_assignment(AssignmentKeyDBParams {
                level: parent.level,
                item_id: parent.id,
                company_id,
            })
            .await?;

        Ok(assignment.map(|assignment| assignment.window))
    }

    async fn assign_one(&self, params: AssignParams) -> Result<DateAssignment, AssignError> {
        let item = WorkItemRef::new(params.level, params.item_id);
        check_range(item.level, &params.window).map_err(AssignError::Rejected)?;

        let parent = self
            .parent_window(item, params.company_id, params.is_flexible)
            .await?;

        if let Err(rejection) = validate(
            item.level,
            &params.window,
            params.is_flexible,
            parent.as_ref(),
        ) {
            tracing::warn!(
                level = %item.level,
                item_id = %item.id,
                company_id = %params.company_id,
                reason = %rejection.reason,
                "date assignment rejected"
            );
            return Err(AssignError::Rejected(rejection));
        }

        let assignment = self
            .assignments
            .upsert_assignment(UpsertAssignmentDBParams {
                level: item.level,
                item_id: item.id,
                company_id: params.company_id,
                window: params.window,
                is_flexible: params.is_flexible,
                actor: params.actor,
            })
            .await?;
        tracing::debug!(assignment_id = %assignment.id, "stored date assignment");

        Ok(assignment)
    }

    async fn remove_one(&self, params: RemoveParams) -> Result<DateAssignment, RemoveError> {
        let removed = self
            .assignments
            .remove_assignment(AssignmentKeyDBParams {
                level: params.level,
                item_id: params.item_id,
                company_id: params.company_id,
            })
            .await?
            .ok_or(RemoveError::NotFound)?;
        tracing::debug!(assignment_id = %removed.id, "removed date assignment");

        Ok(removed)
    }

    async fn load_assignments(
        &self,
        level: Option<Level>,
        item_id: Option<Uuid>,
        company_id: Option<Uuid>,
    ) -> Result<Vec<DateAssignment>, QueryError> {
        let assignments = match (item_id, level, company_id) {
            (Some(item_id), Some(level), company_id) => self
                .assignments
                .list_assignments_by_item(ListByItemDBParams { level, item_id })
                .await?
                .into_iter()
                .filter(|a| company_id.is_none_or(|company_id| a.company_id == company_id))
                .collect(),
            (Some(_), None, _) => return Err(QueryError::MissingLevel),
            (None, level, Some(company_id)) => {
                self.assignments
                    .list_assignments_by_company(ListByCompanyDBParams { company_id, level })
                    .await?
            }
            (None, level, None) => {
                self.assignments
                    .list_assignments(ListAssignmentsDBParams { level })
                    .await?
            }
        };

        Ok(assignments)
    }

    async fn snapshots(
        &self,
        items: HashSet<WorkItemRef>,
    ) -> Result<HashMap<WorkItemRef, ItemSnapshot>, QueryError> {
        if items.is_empty() {
            return Ok(HashMap::new());
        }

        let snapshots = self
            .items
            .get_item_snapshots(GetItemSnapshotsDBParams {
                items: items.into_iter().collect(),
            })
            .await?;

        Ok(snapshots
            .into_iter()
            .map(|snapshot| (snapshot.item, snapshot))
            .collect())
    }
}

fn pairs(items: &[WorkItemRef], company_ids: &[Uuid]) -> Vec<(WorkItemRef, Uuid)> {
    items
        .iter()
        .flat_map(|item| company_ids.iter().map(move |company_id| (*item, *company_id)))
        .collect()
}

fn collect_outcomes(outcomes: Vec<PairOutcome>) -> BulkResult {
    let mut result = BulkResult::default();

    for (item, company_id, outcome) in outcomes {
        match outcome {
            Ok(assignment) => result.successes.push(BulkSuccess {
                item_id: item.id,
                company_id,
                assignment,
            }),
            Err((reason, suggestion)) => result.failures.push(BulkFailure {
                item_id: item.id,
                company_id,
                reason,
                suggestion,
            }),
        }
    }

    result
}

fn assign_failure(err: AssignError) -> (ReasonCode, Option<DateWindow>) {
    match err {
        AssignError::Rejected(rejection) => (rejection.reason, rejection.suggestion),
        AssignError::DatabaseError(e) => {
            tracing::error!("bulk assign pair failed: {}", e);
            (ReasonCode::StorageError, None)
        }
    }
}

fn remove_failure(err: RemoveError) -> (ReasonCode, Option<DateWindow>) {
    match err {
        RemoveError::NotFound => (ReasonCode::NotFound, None),
        RemoveError::DatabaseError(e) => {
            tracing::error!("bulk remove pair failed: {}", e);
            (ReasonCode::StorageError, None)
        }
    }
}

#[async_trait]
impl<DB, ITEMS> ScheduleService for Service<DB, ITEMS>
where
    DB: AssignmentRepository,
    ITEMS: WorkItemRepository,
{
    async fn assign(&self, params: AssignParams) -> Result<DateAssignment, AssignError> {
        self.assign_one(params).await
    }

    async fn remove(&self, params: RemoveParams) -> Result<DateAssignment, RemoveError> {
        self.remove_one(params).await
    }

    async fn bulk_assign(&self, params: BulkAssignParams) -> BulkResult {
        let params = &params;
        let outcomes: Vec<PairOutcome> =
            stream::iter(pairs(&params.items, &params.company_ids))
                .map(|(item, company_id)| async move {
                    let outcome = self
                        .assign_one(AssignParams {
                            level: item.level,
                            item_id: item.id,
                            company_id,
                            window: params.window,
                            is_flexible: params.is_flexible,
                            actor: params.actor.clone(),
                        })
                        .await
                        .map_err(assign_failure);

                    (item, company_id, outcome)
                })
                .buffer_unordered(self.bulk_concurrency)
                .collect()
                .await;

        let result = collect_outcomes(outcomes);
        tracing::info!(
            total = result.total(),
            successful = result.successes.len(),
            failed = result.failures.len(),
            "bulk assign finished"
        );

        result
    }

    async fn bulk_remove(&self, params: BulkRemoveParams) -> BulkResult {
        let outcomes: Vec<PairOutcome> =
            stream::iter(pairs(&params.items, &params.company_ids))
                .map(|(item, company_id)| async move {
                    let outcome = self
                        .remove_one(RemoveParams {
                            level: item.level,
                            item_id: item.id,
                            company_id,
                        })
                        .await
                        .map_err(remove_failure);

                    (item, company_id, outcome)
                })
                .buffer_unordered(self.bulk_concurrency)
                .collect()
                .await;

        let result = collect_outcomes(outcomes);
        tracing::info!(
            total = result.total(),
            successful = result.successes.len(),
            failed = result.failures.len(),
            "bulk remove finished"
        );

        result
    }

    async fn get_assignments(
        &self,
        params: GetAssignmentsParams,
    ) -> Result<Vec<DateAssignment>, QueryError> {
        self.load_assignments(params.level, params.item_id, params.company_id)
            .await
    }

    async fn query_compliance(
        &self,
        params: ComplianceQueryParams,
    ) -> Result<ComplianceReport, QueryError> {
        let today = params.today;
        let horizon = params
            .time_range_days
            .and_then(|days| today.checked_sub(Duration::days(i64::from(days))));

        let loaded = self
            .load_assignments(params.level, params.item_id, params.company_id)
            .await?;

        // a point query on one (item, company) pair reports no_date when nothing is stored;
        // a row outside the time range is not the same as no row
        let unassigned = match (params.level, params.item_id, params.company_id) {
            (Some(level), Some(item_id), Some(company_id)) if loaded.is_empty() => {
                Some((WorkItemRef::new(level, item_id), company_id))
            }
            _ => None,
        };

        let assignments: Vec<DateAssignment> = loaded
            .into_iter()
            .filter(|a| horizon.is_none_or(|horizon| a.window.end >= horizon))
            .collect();

        let mut wanted: HashSet<WorkItemRef> = assignments.iter().map(|a| a.item()).collect();
        if let Some((item, _)) = unassigned {
            wanted.insert(item);
        }
        let snapshots = self.snapshots(wanted).await?;

        let mut records: Vec<_> = assignments
            .iter()
            .map(|a| {
                compute_status(
                    a.item(),
                    a.company_id,
                    Some(a),
                    snapshots.get(&a.item()),
                    today,
                    &self.thresholds,
                )
            })
            .collect();
        if let Some((item, company_id)) = unassigned {
            records.push(compute_status(
                item,
                company_id,
                None,
                snapshots.get(&item),
                today,
                &self.thresholds,
            ));
        }

        let companies: Vec<Uuid> = params.company_id.into_iter().collect();

        Ok(ComplianceReport {
            summary: summarize(&records),
            by_project: aggregate_by_project(&records),
            by_company: aggregate_by_company(&records, &companies),
            records,
        })
    }
}
