use crate::models::ValidatedDocument;
use crate::providers::registry::PDF_CONTENT_TYPE;
use crate::providers::{normalize_markdown, DocumentPipeline, PipelineOutput};
use async_trait::async_trait;
use pdf_extract::extract_text_from_mem;

pub struct PdfPipeline;

impl PdfPipeline {
    pub fn new() -> Self {
        Self
    }

    /// Joins hard-wrapped lines back into paragraphs; blank lines stay as breaks.
    fn to_markdown(&self, text: &str) -> String {
        let mut paragraphs = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for line in text.lines().map(str::trim) {
            if line.is_empty() {
                if !current.is_empty() {
                    paragraphs.push(current.join(" "));
                    current.clear();
                }
            } else {
                current.push(line);
            }
        }
        if !current.is_empty() {
            paragraphs.push(current.join(" "));
        }

        normalize_markdown(&paragraphs.join("\n\n"))
    }
}

impl Default for PdfPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentPipeline for PdfPipeline {
    fn name(&self) -> &'static str {
        "pdf"
    }

    async fn convert(&self, document: &ValidatedDocument) -> anyhow::Result<PipelineOutput> {
        let bytes = document.bytes.clone();
        let text = tokio::task::spawn_blocking(move || extract_text_from_mem(&bytes)).await??;

        Ok(PipelineOutput {
            markdown: self.to_markdown(&text),
            mimetype: Some(PDF_CONTENT_TYPE.to_string()),
        })
    }
}
