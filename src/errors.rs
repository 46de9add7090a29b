use crate::domain::principal::PrincipalError;
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;
use thiserror::Error;

#[derive(Serialize)]
pub struct AppErrorResponse {
    code: u16,
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("auth required")]
    Unauthorized(Option<String>),

    #[error("internal server error")]
    InternalServerError,

    #[error("bad request")]
    BadRequest(Option<String>),

    #[error("user may not perform that action")]
    Forbidden,

    #[error("request path not found")]
    NotFound,
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> Option<String> {
        match self {
            Self::Unauthorized(message) | Self::BadRequest(message) => message.clone(),
            Self::Forbidden | Self::NotFound | Self::InternalServerError => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        (
            status_code,
            Json(AppErrorResponse {
                code: status_code.as_u16(),
                status: self.to_string(),
                message: self.message(),
            }),
        )
            .into_response()
    }
}

impl From<PrincipalError> for AppError {
    fn from(value: PrincipalError) -> Self {
        match value {
            PrincipalError::Forbidden => AppError::Forbidden,
            PrincipalError::UnknownRole | PrincipalError::MissingCompany => {
                AppError::Unauthorized(Some(value.to_string()))
            }
        }
    }
}

pub fn internal_error<E: ToString>(err: E) -> AppError {
    tracing::error!("{}", err.to_string());
    AppError::InternalServerError
}

pub fn bad_request(message: &str) -> AppError {
    AppError::BadRequest(Some(message.to_string()))
}
