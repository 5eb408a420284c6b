use crate::error::{ProcessingError, Result};
use crate::models::{ConversionResult, ProcessingMode, ValidatedDocument};
use crate::providers::registry::{self, PDF_CONTENT_TYPE};
use crate::services::llm::{join_pages, PageExtractor};
use std::sync::Arc;
use tracing::{error, info};

pub const UNKNOWN_MIMETYPE: &str = "unknown";

/// Sends a validated document down exactly one conversion strategy.
///
/// A single attempt per request: engine failures are reported, never retried.
pub struct ConversionRouter {
    extractor: Arc<dyn PageExtractor>,
}

impl ConversionRouter {
    pub fn new(extractor: Arc<dyn PageExtractor>) -> Self {
        Self { extractor }
    }

    pub async fn convert(&self, document: &ValidatedDocument) -> Result<ConversionResult> {
        match document.mode {
            ProcessingMode::Standard => self.convert_standard(document).await,
            ProcessingMode::Llm => self.convert_with_llm(document).await,
        }
    }

    async fn convert_standard(&self, document: &ValidatedDocument) -> Result<ConversionResult> {
        let (format, pipeline) = registry::get_pipeline_by_content_type(&document.content_type)
            .ok_or_else(|| {
                ProcessingError::internal(format!(
                    "no conversion pipeline for {}",
                    document.content_type
                ))
            })?;

        info!(
            ?format,
            pipeline = pipeline.name(),
            filename = %document.filename,
            "Converting document"
        );

        let output = pipeline.convert(document).await.map_err(|e| {
            error!(pipeline = pipeline.name(), error = %e, "Document conversion failed");
            ProcessingError::internal(e.to_string())
        })?;

        Ok(ConversionResult {
            markdown: output.markdown,
            mimetype: output
                .mimetype
                .filter(|mimetype| !mimetype.is_empty())
                .unwrap_or_else(|| UNKNOWN_MIMETYPE.to_string()),
        })
    }

    async fn convert_with_llm(&self, document: &ValidatedDocument) -> Result<ConversionResult> {
        info!(filename = %document.filename, "Converting document with LLM");

        let pages = self.extractor.extract_pages(document).await.map_err(|e| {
            error!(error = %e, "LLM page extraction failed");
            ProcessingError::internal(e.to_string())
        })?;

        Ok(ConversionResult {
            markdown: join_pages(pages),
            mimetype: PDF_CONTENT_TYPE.to_string(),
        })
    }
}
