use crate::domain::schedule::{BulkResult, DateAssignment, DateWindow, ReasonCode};
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
pub struct BulkResponse {
    results: Vec<BulkPairResult>,
    summary: BulkSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkPairResult {
    item_id: Uuid,
    company_id: Uuid,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<DateAssignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ReasonCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<DateWindow>,
}

#[derive(Serialize)]
pub struct BulkSummary {
    total: usize,
    successful: usize,
    failed: usize,
}

impl From<BulkResult> for BulkResponse {
    fn from(value: BulkResult) -> Self {
        let summary = BulkSummary {
            total: value.total(),
            successful: value.successes.len(),
            failed: value.failures.len(),
        };

        let successes = value.successes.into_iter().map(|success| BulkPairResult {
            item_id: success.item_id,
            company_id: success.company_id,
            success: true,
            data: Some(success.assignment),
            error: None,
            suggestion: None,
        });
        let failures = value.failures.into_iter().map(|failure| BulkPairResult {
            item_id: failure.item_id,
            company_id: failure.company_id,
            success: false,
            data: None,
            error: Some(failure.reason),
            suggestion: failure.suggestion,
        });

        Self {
            results: successes.chain(failures).collect(),
            summary,
        }
    }
}

// partial failure is still a successful request; callers read the per-pair results
impl IntoResponse for BulkResult {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(BulkResponse::from(self))).into_response()
    }
}
