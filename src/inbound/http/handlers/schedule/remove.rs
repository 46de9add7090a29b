use crate::core::application::ApplicationServices;
use crate::domain::principal::Principal;
use crate::domain::schedule::{Level, RemoveError, RemoveParams, ScheduleService};
use crate::errors::{AppError, internal_error};
use crate::inbound::http::responses::assignment::AssignmentOutcome;
use axum::Extension;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use uuid::Uuid;

pub async fn remove_dates<S: ApplicationServices>(
    State(state): State<S>,
    Extension(principal): Extension<Principal>,
    Path((level, item_id, company_id)): Path<(Level, Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    if !principal.can_manage_dates() {
        return Err(AppError::Forbidden);
    }

    let result = state
        .schedule_service()
        .remove(RemoveParams {
            level,
            item_id,
            company_id,
        })
        .await;

    match result {
        Ok(assignment) => Ok(AssignmentOutcome::Stored(assignment)),
        Err(RemoveError::NotFound) => Ok(AssignmentOutcome::NotFound),
        Err(RemoveError::DatabaseError(e)) => Err(internal_error(e)),
    }
}
