use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::ServiceError;
use thiserror::Error;
use tracing::error;

/// JSON error body: `{"status":"Error","error":...,"code":...,"detail":...}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &str, code: u16, detail: Option<String>) -> Self {
        Self { status, body: ErrorBody { status: "Error", error: error.to_string(), code, detail } }
    }

    pub fn unauthorized(detail: &str) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", 1005, Some(detail.to_string()))
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let code = e.code();
        match &e {
            ServiceError::Validation(_) => Self::new(StatusCode::BAD_REQUEST, "Validation Error", code, Some(e.to_string())),
            ServiceError::AlreadyExists => Self::new(StatusCode::CONFLICT, "Already Exists", code, Some(e.to_string())),
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Not Found", code, Some(e.to_string())),
            ServiceError::InvalidCredentials => Self::new(StatusCode::UNAUTHORIZED, "Invalid Credentials", code, None),
            ServiceError::InvalidToken(_) => Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", code, Some(e.to_string())),
            ServiceError::AlreadyReserved => Self::new(StatusCode::CONFLICT, "Already Reserved", code, Some(e.to_string())),
            ServiceError::Internal(_) => {
                error!(error = %e, "internal error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", code, None)
            }
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(r: JsonRejection) -> Self {
        Self::new(r.status(), "Bad Request", 1001, Some(r.body_text()))
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(r: PathRejection) -> Self {
        Self::new(r.status(), "Bad Request", 1001, Some(r.body_text()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_domain_errors_to_status() {
        let cases = [
            (ServiceError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::AlreadyExists, StatusCode::CONFLICT),
            (ServiceError::NotFound("computer"), StatusCode::NOT_FOUND),
            (ServiceError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (ServiceError::InvalidToken("bad".into()), StatusCode::UNAUTHORIZED),
            (ServiceError::AlreadyReserved, StatusCode::CONFLICT),
            (ServiceError::Internal("db down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).status, status);
        }
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let e = JsonApiError::from(ServiceError::Internal("password_hash column missing".into()));
        assert!(e.body.detail.is_none());
        assert_eq!(e.body.code, 1200);
    }
}
