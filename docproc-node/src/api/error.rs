use crate::error::ProcessingError;
use crate::models::ErrorResponse;
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::QueryRejection,
    },
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

/// Client-facing message for engine failures; the real cause is only logged.
pub const INTERNAL_ERROR_DETAIL: &str = "Error processing document";

#[derive(Debug)]
pub struct ApiError(pub ProcessingError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        let detail = if self.0.is_client_error() {
            self.0.to_string()
        } else {
            error!(error = %self.0, "Request failed");
            INTERNAL_ERROR_DETAIL.to_string()
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

impl From<ProcessingError> for ApiError {
    fn from(err: ProcessingError) -> Self {
        Self(err)
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self(ProcessingError::bad_request(format!(
            "Invalid multipart body: {}",
            err.body_text()
        )))
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self(ProcessingError::bad_request(format!(
            "Invalid multipart request: {}",
            rejection.body_text()
        )))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(ProcessingError::bad_request(format!(
            "Invalid query string: {}",
            rejection.body_text()
        )))
    }
}
