use crate::core::application::ApplicationServices;
use crate::domain::principal::Principal;
use crate::domain::schedule::{ComplianceQueryParams, Level, QueryError, ScheduleService};
use crate::errors::{AppError, bad_request, internal_error};
use axum::Extension;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceQuery {
    level: Option<Level>,
    item_id: Option<Uuid>,
    company_id: Option<Uuid>,
    time_range_days: Option<u32>,
}

pub async fn query_compliance<S: ApplicationServices>(
    State(state): State<S>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<ComplianceQuery>,
) -> Result<impl IntoResponse, AppError> {
    let company_id = principal.company_scope(query.company_id)?;

    state
        .schedule_service()
        .query_compliance(ComplianceQueryParams {
            level: query.level,
            item_id: query.item_id,
            company_id,
            time_range_days: query.time_range_days,
            today: OffsetDateTime::now_utc().date(),
        })
        .await
        .map_err(|e| match e {
            QueryError::MissingLevel => bad_request("itemId needs a level"),
            QueryError::DatabaseError(e) => internal_error(e),
        })
}
