use serde::Serialize;

#[derive(Serialize)]
pub enum ResponseType {
    #[serde(rename = "health")]
    Health,

    #[serde(rename = "assignments")]
    Assignments,

    #[serde(rename = "compliance")]
    Compliance,
}
