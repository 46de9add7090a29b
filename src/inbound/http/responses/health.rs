use crate::inbound::http::responses::shared::ResponseType;
use serde::Serialize;

////////////////////////////////////////////////////////////////////////////////////////////////////
// Health
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Serialize)]
pub struct HealthResponse {
    data: HealthData,
    #[serde(rename = "type")]
    object_type: ResponseType,
}

#[derive(Serialize)]
pub struct HealthData {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

/// Liveness only; the database is not probed.
pub fn health_response() -> HealthResponse {
    HealthResponse {
        data: HealthData {
            status: "OK",
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        },
        object_type: ResponseType::Health,
    }
}
