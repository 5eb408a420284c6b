use super::{ApiError, AppState};
use crate::error::ProcessingError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Rejects requests whose `X-API-Key` header is absent or does not match the
/// configured key.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authorized = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|key| state.settings.api_key_matches(key));

    match authorized {
        Some(true) => Ok(next.run(request).await),
        Some(false) => {
            warn!(path = %request.uri().path(), "Rejected request with invalid API key");
            Err(ProcessingError::Unauthorized.into())
        }
        None => {
            warn!(path = %request.uri().path(), "Rejected request without API key");
            Err(ProcessingError::Unauthorized.into())
        }
    }
}
