use crate::core::application::ApplicationServices;
use crate::domain::principal::Principal;
use crate::domain::schedule::{AssignError, AssignParams, DateWindow, Level, ScheduleService};
use crate::errors::{AppError, internal_error};
use crate::inbound::http::responses::assignment::AssignmentOutcome;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Deserialize;
use time::Date;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    level: Level,
    item_id: Uuid,
    company_id: Uuid,
    #[serde(default)]
    start_date: Option<Date>,
    end_date: Date,
    #[serde(default)]
    is_flexible: bool,
}

pub async fn assign_dates<S: ApplicationServices>(
    State(state): State<S>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<AssignRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !principal.can_manage_dates() {
        return Err(AppError::Forbidden);
    }

    let result = state
        .schedule_service()
        .assign(AssignParams {
            level: request.level,
            item_id: request.item_id,
            company_id: request.company_id,
            window: DateWindow {
                start: request.start_date,
                end: request.end_date,
            },
            is_flexible: request.is_flexible,
            actor: principal.user_id,
        })
        .await;

    match result {
        Ok(assignment) => Ok(AssignmentOutcome::Stored(assignment)),
        Err(AssignError::Rejected(rejection)) => Ok(AssignmentOutcome::Rejected(rejection)),
        Err(AssignError::DatabaseError(e)) => Err(internal_error(e)),
    }
}
