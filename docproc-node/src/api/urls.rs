use super::{ApiError, AppState};
use crate::error::ProcessingError;
use crate::models::{ProcessDocumentResponse, ProcessUrlRequest};
use crate::services::url_extractor::parse_target;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

/// Markdown from the URL proxy is always reported as HTML-sourced.
pub const URL_MIMETYPE: &str = "text/html";

pub fn routes() -> Router<AppState> {
    Router::new().route("/process/url", post(process_url))
}

#[derive(Debug, Deserialize)]
pub struct UrlQuery {
    url: Option<String>,
}

/// The target comes from `?url=` or, failing that, a JSON body `{"url": ...}`.
async fn process_url(
    State(state): State<AppState>,
    query: Result<Query<UrlQuery>, QueryRejection>,
    body: Option<Json<ProcessUrlRequest>>,
) -> Result<Json<ProcessDocumentResponse>, ApiError> {
    let Query(query) = query?;
    let raw = query
        .url
        .or_else(|| body.map(|Json(request)| request.url))
        .ok_or_else(|| ProcessingError::bad_request("Field 'url' is required"))?;

    let target = parse_target(&raw)?;

    let markdown = state
        .url_extractor
        .extract(&target)
        .await
        .ok_or_else(|| {
            ProcessingError::bad_request(format!("Couldn't get markdown from URL: {}", raw))
        })?;

    info!(url = %target, "URL processed successfully");

    let response = state
        .assembler
        .respond(markdown, URL_MIMETYPE.to_string())
        .await?;
    Ok(Json(response))
}
