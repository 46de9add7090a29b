use crate::domain::schedule::{DateAssignment, DateWindow, ReasonCode, Rejection};
use crate::inbound::http::responses::shared::ResponseType;
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;

////////////////////////////////////////////////////////////////////////////////////////////////////
// Single assignment outcome
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Serialize)]
pub struct AssignmentOutcomeBody {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    assignment: Option<DateAssignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<ReasonCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<DateWindow>,
}

pub enum AssignmentOutcome {
    Stored(DateAssignment),
    Rejected(Rejection),
    NotFound,
}

impl IntoResponse for AssignmentOutcome {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AssignmentOutcome::Stored(assignment) => (
                StatusCode::OK,
                AssignmentOutcomeBody {
                    ok: true,
                    assignment: Some(assignment),
                    reason: None,
                    suggestion: None,
                },
            ),
            AssignmentOutcome::Rejected(rejection) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                AssignmentOutcomeBody {
                    ok: false,
                    assignment: None,
                    reason: Some(rejection.reason),
                    suggestion: rejection.suggestion,
                },
            ),
            AssignmentOutcome::NotFound => (
                StatusCode::NOT_FOUND,
                AssignmentOutcomeBody {
                    ok: false,
                    assignment: None,
                    reason: Some(ReasonCode::NotFound),
                    suggestion: None,
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Assignment list
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Serialize)]
pub struct AssignmentListResponse {
    data: Vec<DateAssignment>,
    #[serde(rename = "type")]
    object_type: ResponseType,
}

pub fn assignment_list_response(assignments: Vec<DateAssignment>) -> AssignmentListResponse {
    AssignmentListResponse {
        data: assignments,
        object_type: ResponseType::Assignments,
    }
}
