use crate::domain::schedule::{
    AssignmentKeyDBParams, AssignmentRepository, DateAssignment, FindParentDBParams,
    GetItemSnapshotsDBParams, ItemSnapshot, ListAssignmentsDBParams, ListByCompanyDBParams,
    ListByItemDBParams, UpsertAssignmentDBParams, WorkItemRef, WorkItemRepository,
};
use crate::outbound::db::error::Error;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use time::{Date, OffsetDateTime, PrimitiveDateTime};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct MemoryItem {
    parent: Option<WorkItemRef>,
    progress: u8,
    completed: bool,
    completed_on: Option<Date>,
}

#[derive(Debug, Default)]
struct MemoryState {
    assignments: HashMap<AssignmentKeyDBParams, DateAssignment>,
    items: HashMap<WorkItemRef, MemoryItem>,
}

impl MemoryState {
    fn project_of(&self, item: WorkItemRef) -> Option<Uuid> {
        let mut current = item;
        // the hierarchy is at most three levels deep
        for _ in 0..3 {
            match self.items.get(&current)?.parent {
                Some(parent) => current = parent,
                None => return Some(current.id),
            }
        }

        None
    }

    fn sorted(mut assignments: Vec<DateAssignment>) -> Vec<DateAssignment> {
        assignments.sort_by_key(|a| (a.level, a.window.end, a.company_id, a.item_id));
        assignments
    }
}

/// In-process store backing both repository ports. Each call holds the lock
/// for a single map operation, so an upsert is one atomic write.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_item(&self, item: WorkItemRef, parent: Option<WorkItemRef>) {
        self.state.write().await.items.insert(
            item,
            MemoryItem {
                parent,
                progress: 0,
                completed: false,
                completed_on: None,
            },
        );
    }

    pub async fn set_progress(&self, item: WorkItemRef, progress: u8) {
        if let Some(entry) = self.state.write().await.items.get_mut(&item) {
            entry.progress = progress.min(100);
        }
    }

    pub async fn mark_completed(&self, item: WorkItemRef, completed_on: Option<Date>) {
        if let Some(entry) = self.state.write().await.items.get_mut(&item) {
            entry.progress = 100;
            entry.completed = true;
            entry.completed_on = completed_on;
        }
    }
}

fn now() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}

#[async_trait]
impl AssignmentRepository for MemoryStore {
    async fn upsert_assignment(
        &self,
        params: UpsertAssignmentDBParams,
    ) -> Result<DateAssignment, Error> {
        let key = AssignmentKeyDBParams {
            level: params.level,
            item_id: params.item_id,
            company_id: params.company_id,
        };
        let timestamp = now();
        let mut state = self.state.write().await;

        let assignment = state
            .assignments
            .entry(key)
            .and_modify(|existing| {
                existing.window = params.window;
                existing.is_flexible = params.is_flexible;
                existing.updated_by = params.actor.clone();
                existing.updated_at = timestamp;
            })
            .or_insert_with(|| DateAssignment {
                id: Uuid::now_v7(),
                level: params.level,
                item_id: params.item_id,
                company_id: params.company_id,
                window: params.window,
                is_flexible: params.is_flexible,
                created_by: params.actor.clone(),
                updated_by: params.actor.clone(),
                created_at: timestamp,
                updated_at: timestamp,
            });

        Ok(assignment.clone())
    }

    async fn remove_assignment(
        &self,
        params: AssignmentKeyDBParams,
    ) -> Result<Option<DateAssignment>, Error> {
        Ok(self.state.write().await.assignments.remove(&params))
    }

    async fn find_assignment(
        &self,
        params: AssignmentKeyDBParams,
    ) -> Result<Option<DateAssignment>, Error> {
        Ok(self.state.read().await.assignments.get(&params).cloned())
    }

    async fn list_assignments_by_item(
        &self,
        params: ListByItemDBParams,
    ) -> Result<Vec<DateAssignment>, Error> {
        let state = self.state.read().await;
        let assignments = state
            .assignments
            .values()
            .filter(|a| a.level == params.level && a.item_id == params.item_id)
            .cloned()
            .collect();

        Ok(MemoryState::sorted(assignments))
    }

    async fn list_assignments_by_company(
        &self,
        params: ListByCompanyDBParams,
    ) -> Result<Vec<DateAssignment>, Error> {
        let state = self.state.read().await;
        let assignments = state
            .assignments
            .values()
            .filter(|a| a.company_id == params.company_id)
            .filter(|a| params.level.is_none_or(|level| a.level == level))
            .cloned()
            .collect();

        Ok(MemoryState::sorted(assignments))
    }

    async fn list_assignments(
        &self,
        params: ListAssignmentsDBParams,
    ) -> Result<Vec<DateAssignment>, Error> {
        let state = self.state.read().await;
        let assignments = state
            .assignments
            .values()
            .filter(|a| params.level.is_none_or(|level| a.level == level))
            .cloned()
            .collect();

        Ok(MemoryState::sorted(assignments))
    }
}

#[async_trait]
impl WorkItemRepository for MemoryStore {
    async fn find_parent(
        &self,
        params: FindParentDBParams,
    ) -> Result<Option<WorkItemRef>, Error> {
        let state = self.state.read().await;

        Ok(state
            .items
            .get(&params.item)
            .and_then(|entry| entry.parent))
    }

    async fn get_item_snapshots(
        &self,
        params: GetItemSnapshotsDBParams,
    ) -> Result<Vec<ItemSnapshot>, Error> {
        let state = self.state.read().await;

        Ok(params
            .items
            .into_iter()
            .filter_map(|item| {
                let entry = state.items.get(&item)?;
                Some(ItemSnapshot {
                    item,
                    project_id: state.project_of(item)?,
                    progress: entry.progress,
                    completed: entry.completed,
                    completed_on: entry.completed_on,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schedule::{DateWindow, Level};
    use time::macros::date;

    const PROJECT: Uuid = Uuid::from_u128(1);
    const SUB_PROJECT: Uuid = Uuid::from_u128(2);
    const TASK: Uuid = Uuid::from_u128(3);
    const COMPANY: Uuid = Uuid::from_u128(9);

    async fn store() -> MemoryStore {
        let store = MemoryStore::new();
        let project = WorkItemRef::new(Level::Project, PROJECT);
        let sub_project = WorkItemRef::new(Level::SubProject, SUB_PROJECT);
        store.add_item(project, None).await;
        store.add_item(sub_project, Some(project)).await;
        store
            .add_item(WorkItemRef::new(Level::Task, TASK), Some(sub_project))
            .await;
        store
    }

    fn upsert(end: Date, actor: &str) -> UpsertAssignmentDBParams {
        UpsertAssignmentDBParams {
            level: Level::Task,
            item_id: TASK,
            company_id: COMPANY,
            window: DateWindow::ending(end),
            is_flexible: false,
            actor: actor.to_string(),
        }
    }

    #[tokio::test]
    async fn test_upsert_keeps_identity() {
        let store = store().await;

        let first = store
            .upsert_assignment(upsert(date!(2025 - 03 - 01), "admin"))
            .await
            .unwrap();
        let second = store
            .upsert_assignment(upsert(date!(2025 - 04 - 01), "operator"))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!("admin", second.created_by);
        assert_eq!("operator", second.updated_by);
        assert_eq!(date!(2025 - 04 - 01), second.window.end);
        assert_eq!(
            1,
            store
                .list_assignments(ListAssignmentsDBParams { level: None })
                .await
                .unwrap()
                .len()
        );
    }

    #[tokio::test]
    async fn test_remove_only_touches_triple() {
        let store = store().await;
        store
            .upsert_assignment(upsert(date!(2025 - 03 - 01), "admin"))
            .await
            .unwrap();
        let key = AssignmentKeyDBParams {
            level: Level::Task,
            item_id: TASK,
            company_id: Uuid::from_u128(10),
        };

        assert_eq!(None, store.remove_assignment(key).await.unwrap());
        assert_eq!(
            1,
            store
                .list_assignments_by_company(ListByCompanyDBParams {
                    company_id: COMPANY,
                    level: Some(Level::Task),
                })
                .await
                .unwrap()
                .len()
        );
    }

    #[tokio::test]
    async fn test_hierarchy_lookup() {
        let store = store().await;

        let parent = store
            .find_parent(FindParentDBParams {
                item: WorkItemRef::new(Level::Task, TASK),
            })
            .await
            .unwrap();
        assert_eq!(Some(WorkItemRef::new(Level::SubProject, SUB_PROJECT)), parent);

        let snapshots = store
            .get_item_snapshots(GetItemSnapshotsDBParams {
                items: vec![
                    WorkItemRef::new(Level::Task, TASK),
                    WorkItemRef::new(Level::Task, Uuid::from_u128(99)),
                ],
            })
            .await
            .unwrap();
        assert_eq!(1, snapshots.len());
        assert_eq!(PROJECT, snapshots[0].project_id);
    }
}
