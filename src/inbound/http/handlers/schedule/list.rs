use crate::core::application::ApplicationServices;
use crate::domain::principal::Principal;
use crate::domain::schedule::{GetAssignmentsParams, Level, QueryError, ScheduleService};
use crate::errors::{AppError, bad_request, internal_error};
use crate::inbound::http::responses::assignment::assignment_list_response;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentQuery {
    level: Option<Level>,
    item_id: Option<Uuid>,
    company_id: Option<Uuid>,
}

pub async fn list_assignments<S: ApplicationServices>(
    State(state): State<S>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<AssignmentQuery>,
) -> Result<impl IntoResponse, AppError> {
    let company_id = principal.company_scope(query.company_id)?;

    let assignments = state
        .schedule_service()
        .get_assignments(GetAssignmentsParams {
            level: query.level,
            item_id: query.item_id,
            company_id,
        })
        .await
        .map_err(|e| match e {
            QueryError::MissingLevel => bad_request("itemId needs a level"),
            QueryError::DatabaseError(e) => internal_error(e),
        })?;

    Ok(Json(assignment_list_response(assignments)))
}
