use axum::http::StatusCode;
use thiserror::Error;

pub type Result<T, E = ProcessingError> = std::result::Result<T, E>;

/// Failure taxonomy for the ingestion pipeline.
///
/// Client-fault variants map to 4xx responses, `Internal` maps to 500.
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("{0}")]
    BadRequest(String),

    #[error("File size {size} exceeds the maximum allowed size of {limit}")]
    PayloadTooLarge { size: u64, limit: u64 },

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Invalid API key")]
    Unauthorized,

    #[error("Error processing document: {0}")]
    Internal(String),
}

impl ProcessingError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}

/// Startup configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}
