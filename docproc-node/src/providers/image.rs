use crate::models::ValidatedDocument;
use crate::providers::{DocumentPipeline, PipelineOutput};
use async_trait::async_trait;

/// Placeholder emitted for pictures the structural pipeline cannot read.
pub const IMAGE_PLACEHOLDER: &str = "<!-- image -->";

pub struct ImagePipeline;

impl ImagePipeline {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImagePipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentPipeline for ImagePipeline {
    fn name(&self) -> &'static str {
        "image"
    }

    async fn convert(&self, document: &ValidatedDocument) -> anyhow::Result<PipelineOutput> {
        Ok(PipelineOutput {
            markdown: IMAGE_PLACEHOLDER.to_string(),
            mimetype: Some(document.content_type.clone()),
        })
    }
}
