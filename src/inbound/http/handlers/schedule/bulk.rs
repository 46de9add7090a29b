use crate::core::application::ApplicationServices;
use crate::domain::principal::Principal;
use crate::domain::schedule::{
    BulkAssignParams, BulkRemoveParams, DateWindow, Level, ScheduleService, WorkItemRef,
};
use crate::errors::{AppError, bad_request};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkOperation {
    AssignDates,
    RemoveDates,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkRequest {
    operation: BulkOperation,
    level: Level,
    items: Vec<Uuid>,
    company_ids: Vec<Uuid>,
    #[serde(default)]
    window: Option<DateWindow>,
    #[serde(default)]
    is_flexible: bool,
}

pub async fn bulk_dates<S: ApplicationServices>(
    State(state): State<S>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<BulkRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !principal.can_manage_dates() {
        return Err(AppError::Forbidden);
    }

    let max_pairs = state.config().max_bulk_pairs;
    let pairs = request.items.len().saturating_mul(request.company_ids.len());
    if pairs > max_pairs {
        tracing::warn!(pairs, max_pairs, "bulk request too large");
        return Err(bad_request(
            format!("bulk request expands to {pairs} pairs, the limit is {max_pairs}").as_str(),
        ));
    }

    let items = request
        .items
        .into_iter()
        .map(|id| WorkItemRef::new(request.level, id))
        .collect();

    let result = match request.operation {
        BulkOperation::AssignDates => {
            let window = request
                .window
                .ok_or_else(|| bad_request("assign_dates needs a window"))?;

            state
                .schedule_service()
                .bulk_assign(BulkAssignParams {
                    items,
                    company_ids: request.company_ids,
                    window,
                    is_flexible: request.is_flexible,
                    actor: principal.user_id,
                })
                .await
        }
        BulkOperation::RemoveDates => {
            state
                .schedule_service()
                .bulk_remove(BulkRemoveParams {
                    items,
                    company_ids: request.company_ids,
                })
                .await
        }
    };

    Ok(result)
}
