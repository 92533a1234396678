use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use logylyzer_storage::error::StorageError;

use crate::service::AnalyzeError;

/// Unified API error type for all route handlers.
///
/// Internal details are logged here and never sent to the client.
#[derive(Debug)]
pub enum ApiError {
    NotFound {
        message: String,
        service_name: Option<String>,
    },
    BadRequest(String),
    AnalysisFailed(String),
    Internal(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    service_name: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, service_name) = match self {
            ApiError::NotFound {
                message,
                service_name,
            } => (StatusCode::NOT_FOUND, message, service_name),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::AnalysisFailed(msg) => {
                tracing::error!("analysis failed: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AI analysis failed, Internal server error".to_string(),
                    None,
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    None,
                )
            }
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                message,
                service_name,
            }),
        )
            .into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { key } => ApiError::NotFound {
                message: format!("not found: {key}"),
                service_name: None,
            },
            StorageError::InvalidKey(e) => ApiError::BadRequest(e.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<AnalyzeError> for ApiError {
    fn from(e: AnalyzeError) -> Self {
        match e {
            AnalyzeError::Validation(msg) => ApiError::BadRequest(msg),
            AnalyzeError::Inference(e) => ApiError::AnalysisFailed(e.to_string()),
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for ApiError {
    fn from(e: axum::extract::rejection::JsonRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}
