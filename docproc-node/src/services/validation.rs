use crate::error::{ProcessingError, Result};
use crate::models::{ProcessingMode, UploadedDocument, ValidatedDocument};
use crate::providers::registry::{self, PDF_CONTENT_TYPE};
use crate::services::classifier;
use bytes::{Bytes, BytesMut};
use tracing::{error, info, warn};

pub const PLACEHOLDER_FILENAME: &str = "Document";

/// Buffers an upload stream, retaining at most `limit` bytes while still
/// counting everything that arrives.
#[derive(Debug)]
pub struct UploadSpooler {
    buffer: BytesMut,
    received: u64,
    limit: u64,
}

impl UploadSpooler {
    pub fn new(limit: u64) -> Self {
        Self {
            buffer: BytesMut::new(),
            received: 0,
            limit,
        }
    }

    pub fn push(&mut self, chunk: &[u8]) {
        let retained = self.buffer.len() as u64;
        if retained < self.limit {
            let room = (self.limit - retained).min(chunk.len() as u64) as usize;
            self.buffer.extend_from_slice(&chunk[..room]);
        }
        self.received += chunk.len() as u64;
    }

    pub fn received(&self) -> u64 {
        self.received
    }

    /// Retained bytes and the observed size (`None` when nothing arrived).
    pub fn finish(self) -> (Bytes, Option<u64>) {
        let size = (self.received > 0).then_some(self.received);
        (self.buffer.freeze(), size)
    }
}

/// Runs the upload checks in order; the first failing check wins.
pub fn validate(upload: UploadedDocument, max_size: u64) -> Result<ValidatedDocument> {
    let UploadedDocument {
        bytes,
        filename,
        size,
        mode,
    } = upload;

    let size = match size {
        Some(size) if size > 0 => size,
        _ => {
            error!("File size is missing");
            return Err(ProcessingError::bad_request("File size is missing"));
        }
    };

    if size > max_size {
        error!(size, max_size, "File size exceeds the maximum allowed size");
        return Err(ProcessingError::PayloadTooLarge {
            size,
            limit: max_size,
        });
    }

    let filename = match filename.map(|name| name.trim().to_string()) {
        Some(name) if !name.is_empty() => name,
        _ => {
            warn!("File name is missing. Setting to '{}'", PLACEHOLDER_FILENAME);
            PLACEHOLDER_FILENAME.to_string()
        }
    };

    if mode == ProcessingMode::Llm && filename == PLACEHOLDER_FILENAME {
        error!("File name is required when using LLM processing");
        return Err(ProcessingError::bad_request(
            "File name is required when using LLM processing",
        ));
    }

    let content_type = classifier::classify(&bytes);
    info!(%content_type, filename = %filename, "Content type from content");

    if mode == ProcessingMode::Llm && content_type != PDF_CONTENT_TYPE {
        error!(%content_type, "LLM processing requires a PDF");
        return Err(ProcessingError::bad_request(format!(
            "LLM processing only supports PDF files, got {}",
            content_type
        )));
    }

    if !registry::is_allowed(&content_type) {
        error!(%content_type, "Content type is not allowed");
        return Err(ProcessingError::UnsupportedMediaType(content_type));
    }

    Ok(ValidatedDocument {
        bytes,
        filename,
        content_type,
        mode,
    })
}
