use crate::models::ValidatedDocument;
use crate::providers::{normalize_markdown, DocumentPipeline, PipelineOutput};
use async_trait::async_trait;

/// Pass-through pipeline for Markdown and plain text uploads.
pub struct MarkdownPipeline;

impl MarkdownPipeline {
    pub fn new() -> Self {
        Self
    }

    fn decode(bytes: &[u8]) -> String {
        let text = String::from_utf8_lossy(bytes);
        text.strip_prefix('\u{feff}').unwrap_or(&text).to_string()
    }
}

impl Default for MarkdownPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentPipeline for MarkdownPipeline {
    fn name(&self) -> &'static str {
        "markdown"
    }

    async fn convert(&self, document: &ValidatedDocument) -> anyhow::Result<PipelineOutput> {
        let text = Self::decode(&document.bytes);

        Ok(PipelineOutput {
            markdown: normalize_markdown(&text),
            mimetype: Some(document.content_type.clone()),
        })
    }
}
