//! LLM-assisted page extraction.
//!
//! Each PDF page is rasterised and read by a vision model. The router only
//! sees the ordered page contents through [`PageExtractor`].

use crate::config::Settings;
use crate::models::ValidatedDocument;
use async_trait::async_trait;
use edgequake_pdf2md::convert::convert_from_bytes;
use edgequake_pdf2md::ConversionConfig;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    /// 1-based page number.
    pub page_number: usize,
    pub content: String,
}

#[async_trait]
pub trait PageExtractor: Send + Sync {
    async fn extract_pages(
        &self,
        document: &ValidatedDocument,
    ) -> anyhow::Result<Vec<ExtractedPage>>;
}

/// Concatenates pages in page order, separated by a blank line.
pub fn join_pages(mut pages: Vec<ExtractedPage>) -> String {
    pages.sort_by_key(|page| page.page_number);
    pages
        .into_iter()
        .map(|page| page.content)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Vision-model extractor backed by edgequake-pdf2md.
pub struct VisionPageExtractor {
    config: ConversionConfig,
}

impl VisionPageExtractor {
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Provider and model come from settings when given; otherwise the
    /// provider is auto-detected from the environment at call time.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let mut builder = ConversionConfig::builder();
        if let Some(provider) = &settings.llm_provider {
            builder = builder.provider_name(provider.clone());
        }
        if let Some(model) = &settings.llm_model {
            builder = builder.model(model.clone());
        }
        Ok(Self::new(builder.build()?))
    }
}

#[async_trait]
impl PageExtractor for VisionPageExtractor {
    async fn extract_pages(
        &self,
        document: &ValidatedDocument,
    ) -> anyhow::Result<Vec<ExtractedPage>> {
        info!(filename = %document.filename, "Extracting pages with vision model");
        let output = convert_from_bytes(&document.bytes, &self.config).await?;

        let mut pages = Vec::with_capacity(output.pages.len());
        for page in output.pages {
            if let Some(err) = &page.error {
                warn!(page = page.page_num, error = %err, "Skipping page that failed extraction");
                continue;
            }
            pages.push(ExtractedPage {
                page_number: page.page_num,
                content: page.markdown,
            });
        }

        anyhow::ensure!(
            !pages.is_empty(),
            "no page of {} could be extracted",
            document.filename
        );
        Ok(pages)
    }
}
