use super::{ApiError, AppState};
use crate::error::ProcessingError;
use crate::models::{ProcessDocumentResponse, ProcessingMode, UploadedDocument};
use crate::services::validation::{self, UploadSpooler};
use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use tracing::info;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/process/document", post(process_document))
        // The spooler enforces the size ceiling itself and reports the real size.
        .layer(DefaultBodyLimit::disable())
}

/// Multipart upload: a `file` part and an optional `use_llm` flag.
async fn process_document(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ProcessDocumentResponse>, ApiError> {
    let mut multipart = multipart?;
    let max_size = state.settings.max_file_size;
    let mut upload = None;
    let mut use_llm = false;

    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().map(str::to_string);
                let mut spooler = UploadSpooler::new(max_size);
                while let Some(chunk) = field.chunk().await? {
                    spooler.push(&chunk);
                }
                let (bytes, size) = spooler.finish();
                upload = Some((bytes, filename, size));
            }
            Some("use_llm") => {
                use_llm = parse_flag(&field.text().await?)?;
            }
            _ => {}
        }
    }

    let (bytes, filename, size) =
        upload.ok_or_else(|| ProcessingError::bad_request("Field 'file' is required"))?;

    let document = validation::validate(
        UploadedDocument {
            bytes,
            filename,
            size,
            mode: ProcessingMode::from_flag(use_llm),
        },
        max_size,
    )?;

    let result = state.router.convert(&document).await?;
    info!(
        filename = %document.filename,
        mimetype = %result.mimetype,
        mode = ?document.mode,
        "Document processed successfully"
    );

    let response = state
        .assembler
        .respond(result.markdown, result.mimetype)
        .await?;
    Ok(Json(response))
}

/// Form booleans as browsers and HTTP clients commonly send them.
pub fn parse_flag(raw: &str) -> Result<bool, ProcessingError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ProcessingError::bad_request(format!(
            "Invalid value for use_llm: {:?}",
            other
        ))),
    }
}
