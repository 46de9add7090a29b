use crate::domain::schedule::{
    FindParentDBParams, GetItemSnapshotsDBParams, ItemSnapshot, Level, WorkItemRef,
    WorkItemRepository,
};
use crate::outbound::db::error::Error;
use crate::outbound::db::models::{ItemStateRow, ParentRow};
use crate::outbound::db::repository::Repository;
use async_trait::async_trait;
use uuid::Uuid;

impl Repository {
    async fn item_states(
        &self,
        level: Level,
        ids: Vec<Uuid>,
    ) -> Result<Vec<ItemSnapshot>, Error> {
        let query = match level {
            Level::Project => {
                r#"
select p.id, p.id as project_id, p.progress, p.status, p.completed_at
from projects p
where p.id = any($1)
"#
            }
            Level::SubProject => {
                r#"
select s.id, s.project_id, s.progress, s.status, s.completed_at
from sub_projects s
where s.id = any($1)
"#
            }
            Level::Task => {
                r#"
select t.id, s.project_id, t.progress, t.status, t.completed_at
from tasks t
join sub_projects s on s.id = t.sub_project_id
where t.id = any($1)
"#
            }
        };

        let rows = sqlx::query_as::<_, ItemStateRow>(query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| row.into_snapshot(level))
            .collect())
    }
}

#[async_trait]
impl WorkItemRepository for Repository {
    async fn find_parent(
        &self,
        params: FindParentDBParams,
    ) -> Result<Option<WorkItemRef>, Error> {
        let (query, parent_level) = match params.item.level {
            Level::Project => return Ok(None),
            Level::SubProject => (
                "select s.project_id as parent_id from sub_projects s where s.id = $1",
                Level::Project,
            ),
            Level::Task => (
                "select t.sub_project_id as parent_id from tasks t where t.id = $1",
                Level::SubProject,
            ),
        };

        let result = sqlx::query_as::<_, ParentRow>(query)
            .bind(params.item.id)
            .fetch_optional(&self.pool)
            .await?
            .map(|row| WorkItemRef::new(parent_level, row.parent_id));

        Ok(result)
    }

    async fn get_item_snapshots(
        &self,
        params: GetItemSnapshotsDBParams,
    ) -> Result<Vec<ItemSnapshot>, Error> {
        let mut snapshots = Vec::with_capacity(params.items.len());

        for level in [Level::Project, Level::SubProject, Level::Task] {
            let ids: Vec<Uuid> = params
                .items
                .iter()
                .filter(|item| item.level == level)
                .map(|item| item.id)
                .collect();
            if ids.is_empty() {
                continue;
            }

            snapshots.extend(self.item_states(level, ids).await?);
        }

        Ok(snapshots)
    }
}
