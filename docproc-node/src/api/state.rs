use crate::config::Settings;
use crate::services::{Assembler, ConversionRouter, PageExtractor, TokenCounter, UrlExtractor};
use std::sync::Arc;

/// Shared, read-only request context.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub router: Arc<ConversionRouter>,
    pub url_extractor: UrlExtractor,
    pub assembler: Assembler,
}

impl AppState {
    pub fn new(
        settings: Settings,
        tokens: Arc<TokenCounter>,
        extractor: Arc<dyn PageExtractor>,
    ) -> Self {
        let url_extractor = UrlExtractor::new(settings.url_proxy_prefix.clone());
        let assembler = Assembler::new(tokens, settings.language_sample_chars);

        Self {
            settings: Arc::new(settings),
            router: Arc::new(ConversionRouter::new(extractor)),
            url_extractor,
            assembler,
        }
    }
}
