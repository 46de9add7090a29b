use crate::domain::schedule::{
    CompanyComplianceStats, ComplianceRecord, ComplianceReport, ComplianceStats,
    ProjectComplianceStats,
};
use crate::inbound::http::responses::shared::ResponseType;
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;

#[derive(Serialize)]
pub struct ComplianceResponse {
    data: ComplianceData,
    #[serde(rename = "type")]
    object_type: ResponseType,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceData {
    records: Vec<ComplianceRecord>,
    summary: ComplianceStats,
    by_project: Vec<ProjectComplianceStats>,
    by_company: Vec<CompanyComplianceStats>,
}

impl IntoResponse for ComplianceReport {
    fn into_response(self) -> Response {
        let response = ComplianceResponse {
            data: ComplianceData {
                records: self.records,
                summary: self.summary,
                by_project: self.by_project,
                by_company: self.by_company,
            },
            object_type: ResponseType::Compliance,
        };

        (StatusCode::OK, Json(response)).into_response()
    }
}
