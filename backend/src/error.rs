use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use shared::ErrorResponse;

use crate::history::HistoryError;
use crate::inference::InferenceError;
use crate::knowledge::KnowledgeError;

/// Errors surfaced by the HTTP layer, rendered as `ErrorResponse` JSON.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("The detection model is not available: {0}")]
    ModelUnavailable(String),
    #[error("Invalid image: {0}")]
    InvalidImage(String),
    #[error("Upload exceeds the {0} byte limit")]
    PayloadTooLarge(usize),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid history id: {0:?}")]
    InvalidId(String),
    #[error("Unknown label: {0:?}")]
    UnknownLabel(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Model error: {0}")]
    Model(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::ModelUnavailable(_) => "model_unavailable",
            ApiError::InvalidImage(_) => "invalid_image",
            ApiError::PayloadTooLarge(_) => "payload_too_large",
            ApiError::NotFound(_) => "not_found",
            ApiError::InvalidId(_) => "invalid_id",
            ApiError::UnknownLabel(_) => "unknown_label",
            ApiError::Storage(_) => "storage",
            ApiError::Model(_) => "model",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InvalidImage(_) | ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::NotFound(_) | ApiError::UnknownLabel(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) | ApiError::Model(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            kind: self.kind().to_string(),
        })
    }
}

impl From<InferenceError> for ApiError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::ModelUnavailable(msg) => ApiError::ModelUnavailable(msg),
            InferenceError::InvalidImage(msg) => ApiError::InvalidImage(msg),
            InferenceError::Model(msg) => ApiError::Model(msg),
        }
    }
}

impl From<HistoryError> for ApiError {
    fn from(err: HistoryError) -> Self {
        match err {
            HistoryError::NotFound(id) => ApiError::NotFound(id),
            HistoryError::InvalidId(id) => ApiError::InvalidId(id),
            other => ApiError::Storage(other.to_string()),
        }
    }
}

impl From<KnowledgeError> for ApiError {
    fn from(err: KnowledgeError) -> Self {
        match err {
            KnowledgeError::UnknownLabel(label) => ApiError::UnknownLabel(label),
        }
    }
}

impl From<actix_multipart::MultipartError> for ApiError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        ApiError::InvalidImage(format!("malformed upload: {}", err))
    }
}

impl From<actix_web::error::BlockingError> for ApiError {
    fn from(err: actix_web::error::BlockingError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
