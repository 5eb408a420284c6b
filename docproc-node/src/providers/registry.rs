use crate::models::AcceptedFormat;
use crate::providers::{
    document::DocxPipeline, html::HtmlPipeline, image::ImagePipeline,
    markdown::MarkdownPipeline, pdf::PdfPipeline, presentation::PresentationPipeline,
    spreadsheet::SpreadsheetPipeline, DocumentPipeline,
};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

pub type PipelineRef = Arc<dyn DocumentPipeline>;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Accepted formats and the content types each one claims, in declaration order.
static ACCEPTED_FORMATS: &[(AcceptedFormat, &[&str])] = &[
    (AcceptedFormat::Pdf, &[PDF_CONTENT_TYPE]),
    (
        AcceptedFormat::Image,
        &[
            "image/jpeg",
            "image/png",
            "image/gif",
            "image/tiff",
            "image/bmp",
            "image/webp",
        ],
    ),
    (
        AcceptedFormat::Docx,
        &["application/vnd.openxmlformats-officedocument.wordprocessingml.document"],
    ),
    (AcceptedFormat::Html, &["text/html"]),
    (
        AcceptedFormat::Pptx,
        &["application/vnd.openxmlformats-officedocument.presentationml.presentation"],
    ),
    (AcceptedFormat::Asciidoc, &["text/plain"]),
    (AcceptedFormat::Md, &["text/markdown"]),
    (
        AcceptedFormat::Xlsx,
        &["application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"],
    ),
];

static PIPELINES: Lazy<HashMap<AcceptedFormat, PipelineRef>> = Lazy::new(|| {
    let mut registry = HashMap::new();
    let text: PipelineRef = Arc::new(MarkdownPipeline::new());

    registry.insert(AcceptedFormat::Pdf, Arc::new(PdfPipeline::new()) as PipelineRef);
    registry.insert(AcceptedFormat::Image, Arc::new(ImagePipeline::new()) as PipelineRef);
    registry.insert(AcceptedFormat::Docx, Arc::new(DocxPipeline::new()) as PipelineRef);
    registry.insert(AcceptedFormat::Html, Arc::new(HtmlPipeline::new()) as PipelineRef);
    registry.insert(AcceptedFormat::Pptx, Arc::new(PresentationPipeline::new()) as PipelineRef);
    registry.insert(AcceptedFormat::Xlsx, Arc::new(SpreadsheetPipeline::new()) as PipelineRef);
    registry.insert(AcceptedFormat::Asciidoc, text.clone());
    registry.insert(AcceptedFormat::Md, text);

    registry
});

/// True iff `content_type` is claimed by any accepted format. Exact match only.
pub fn is_allowed(content_type: &str) -> bool {
    format_for(content_type).is_some()
}

pub fn accepted_formats() -> Vec<AcceptedFormat> {
    ACCEPTED_FORMATS.iter().map(|(format, _)| *format).collect()
}

pub fn content_types(format: AcceptedFormat) -> &'static [&'static str] {
    ACCEPTED_FORMATS
        .iter()
        .find(|(candidate, _)| *candidate == format)
        .map(|(_, types)| *types)
        .unwrap_or(&[])
}

pub fn format_for(content_type: &str) -> Option<AcceptedFormat> {
    ACCEPTED_FORMATS
        .iter()
        .find(|(_, types)| types.iter().any(|candidate| *candidate == content_type))
        .map(|(format, _)| *format)
}

pub fn get_pipeline(format: &AcceptedFormat) -> Option<PipelineRef> {
    PIPELINES.get(format).cloned()
}

pub fn get_pipeline_by_content_type(content_type: &str) -> Option<(AcceptedFormat, PipelineRef)> {
    let format = format_for(content_type)?;
    get_pipeline(&format).map(|pipeline| (format, pipeline))
}
