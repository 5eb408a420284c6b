use crate::error::{ProcessingError, Result};
use crate::models::{ProcessDocumentResponse, TokenCount};
use crate::services::language::{detect_language, get_sample_text};
use crate::services::tokens::TokenCounter;
use std::sync::Arc;

/// Derives language and token counts and shapes the response envelope.
#[derive(Clone)]
pub struct Assembler {
    tokens: Arc<TokenCounter>,
    sample_chars: usize,
}

impl Assembler {
    pub fn new(tokens: Arc<TokenCounter>, sample_chars: usize) -> Self {
        Self {
            tokens,
            sample_chars,
        }
    }

    /// Language is detected on a bounded sample, tokens are counted on the full text.
    pub fn assemble(&self, markdown: &str) -> (String, TokenCount) {
        let language = detect_language(get_sample_text(markdown, self.sample_chars));
        let token_count = self.tokens.count_all(markdown);
        (language, token_count)
    }

    pub async fn respond(
        &self,
        markdown: String,
        mimetype: String,
    ) -> Result<ProcessDocumentResponse> {
        let assembler = self.clone();
        // Tokenizing large documents is CPU-bound.
        tokio::task::spawn_blocking(move || {
            let (language, token_count) = assembler.assemble(&markdown);
            ProcessDocumentResponse {
                markdown,
                language,
                mimetype,
                token_count,
            }
        })
        .await
        .map_err(|e| ProcessingError::internal(format!("post-processing task failed: {}", e)))
    }
}
