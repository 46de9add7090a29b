use crate::domain::schedule::{
    AssignmentKeyDBParams, AssignmentRepository, DateAssignment, ListAssignmentsDBParams,
    ListByCompanyDBParams, ListByItemDBParams, UpsertAssignmentDBParams,
};
use crate::outbound::db::error::Error;
use crate::outbound::db::models::{DateAssignmentRow, DateAssignmentRowList, WorkLevel};
use crate::outbound::db::repository::Repository;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
impl AssignmentRepository for Repository {
    async fn upsert_assignment(
        &self,
        params: UpsertAssignmentDBParams,
    ) -> Result<DateAssignment, Error> {
        let row = sqlx::query_as::<_, DateAssignmentRow>(
            r#"
insert into date_assignments
    (id, level, item_id, company_id, start_date, end_date, is_flexible, created_by, updated_by)
values ($1, $2, $3, $4, $5, $6, $7, $8, $8)
on conflict (level, item_id, company_id) do update set
    start_date = excluded.start_date,
    end_date = excluded.end_date,
    is_flexible = excluded.is_flexible,
    updated_by = excluded.updated_by,
    updated_at = now()
returning *
"#,
        )
        .bind(Uuid::now_v7())
        .bind(WorkLevel::from(params.level))
        .bind(params.item_id)
        .bind(params.company_id)
        .bind(params.window.start)
        .bind(params.window.end)
        .bind(params.is_flexible)
        .bind(params.actor)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::from_write)?;

        Ok(row.into())
    }

    async fn remove_assignment(
        &self,
        params: AssignmentKeyDBParams,
    ) -> Result<Option<DateAssignment>, Error> {
        let result = sqlx::query_as::<_, DateAssignmentRow>(
            r#"
delete from date_assignments
where level = $1 and item_id = $2 and company_id = $3
returning *
"#,
        )
        .bind(WorkLevel::from(params.level))
        .bind(params.item_id)
        .bind(params.company_id)
        .fetch_optional(&self.pool)
        .await?
        .map(|row| row.into());

        Ok(result)
    }

    async fn find_assignment(
        &self,
        params: AssignmentKeyDBParams,
    ) -> Result<Option<DateAssignment>, Error> {
        let result = sqlx::query_as::<_, DateAssignmentRow>(
            r#"
select
    a.*
from date_assignments a
where a.level = $1 and a.item_id = $2 and a.company_id = $3
"#,
        )
        .bind(WorkLevel::from(params.level))
        .bind(params.item_id)
        .bind(params.company_id)
        .fetch_optional(&self.pool)
        .await?
        .map(|row| row.into());

        Ok(result)
    }

    async fn list_assignments_by_item(
        &self,
        params: ListByItemDBParams,
    ) -> Result<Vec<DateAssignment>, Error> {
        let result = sqlx::query_as::<_, DateAssignmentRow>(
            r#"
select
    a.*
from date_assignments a
where a.level = $1 and a.item_id = $2
order by a.company_id
"#,
        )
        .bind(WorkLevel::from(params.level))
        .bind(params.item_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(DateAssignmentRowList(result).into())
    }

    async fn list_assignments_by_company(
        &self,
        params: ListByCompanyDBParams,
    ) -> Result<Vec<DateAssignment>, Error> {
        let result = sqlx::query_as::<_, DateAssignmentRow>(
            r#"
select
    a.*
from date_assignments a
where a.company_id = $1 and ($2::work_level is null or a.level = $2)
order by a.level, a.end_date
"#,
        )
        .bind(params.company_id)
        .bind(params.level.map(WorkLevel::from))
        .fetch_all(&self.pool)
        .await?;

        Ok(DateAssignmentRowList(result).into())
    }

    async fn list_assignments(
        &self,
        params: ListAssignmentsDBParams,
    ) -> Result<Vec<DateAssignment>, Error> {
        let result = sqlx::query_as::<_, DateAssignmentRow>(
            r#"
select
    a.*
from date_assignments a
where $1::work_level is null or a.level = $1
order by a.level, a.end_date
"#,
        )
        .bind(params.level.map(WorkLevel::from))
        .fetch_all(&self.pool)
        .await?;

        Ok(DateAssignmentRowList(result).into())
    }
}
