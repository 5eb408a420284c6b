use bytes::Bytes;
use serde::{Deserialize, Serialize};


/// Logical document formats accepted for processing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AcceptedFormat {
    Pdf,
    Image,
    Docx,
    Html,
    Pptx,
    Asciidoc,
    Md,
    Xlsx,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingMode {
    #[default]
    Standard,
    Llm,
}

impl ProcessingMode {
    pub fn from_flag(use_llm: bool) -> Self {
        if use_llm {
            Self::Llm
        } else {
            Self::Standard
        }
    }
}

/// An upload as received from the transport, before any validation.
///
/// `size` is what the transport observed for the file part. When the part was
/// larger than the configured ceiling `bytes` only holds the retained prefix.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub bytes: Bytes,
    pub filename: Option<String>,
    pub size: Option<u64>,
    pub mode: ProcessingMode,
}

/// An upload that passed every validation check.
#[derive(Debug, Clone)]
pub struct ValidatedDocument {
    pub bytes: Bytes,
    pub filename: String,
    pub content_type: String,
    pub mode: ProcessingMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub markdown: String,
    pub mimetype: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCount {
    pub o200k_base: usize,
    pub cl100k_base: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessDocumentResponse {
    pub markdown: String,
    pub language: String,
    pub mimetype: String,
    pub token_count: TokenCount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessUrlRequest {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub service: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
