use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::application::use_cases::{DeleteBlobError, FetchBlobError, StoreBlobError};

/// API error response
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "message": self.message,
        }));

        (self.status, body).into_response()
    }
}

// Convert use case errors to API errors

impl From<StoreBlobError> for ApiError {
    fn from(err: StoreBlobError) -> Self {
        // Create failures, admission rejections included, all surface as a
        // 500 with the cause in the message.
        ApiError::internal_error(err.to_string())
    }
}

impl From<FetchBlobError> for ApiError {
    fn from(err: FetchBlobError) -> Self {
        match err {
            FetchBlobError::NotFound(_) => ApiError::not_found(err.to_string()),
            FetchBlobError::Storage(e) => ApiError::internal_error(format!("Storage error: {}", e)),
        }
    }
}

impl From<DeleteBlobError> for ApiError {
    fn from(err: DeleteBlobError) -> Self {
        match err {
            DeleteBlobError::NotFound(_) => ApiError::not_found(err.to_string()),
            DeleteBlobError::Storage(e) => ApiError::internal_error(format!("Storage error: {}", e)),
        }
    }
}
