use crate::models::ValidatedDocument;
use crate::providers::{normalize_markdown, DocumentPipeline, PipelineOutput};
use async_trait::async_trait;
use bytes::Bytes;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::{Cursor, Read};

const PPTX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

static SLIDE_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ppt/slides/slide(\d+)\.xml$").unwrap());
static TEXT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<a:t(?:\s[^>]*)?>([^<]*)</a:t>").unwrap());

pub struct PresentationPipeline;

impl PresentationPipeline {
    pub fn new() -> Self {
        Self
    }

    fn unescape(text: &str) -> String {
        text.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&apos;", "'")
            .replace("&amp;", "&")
    }

    /// One line per `<a:p>` paragraph, runs concatenated.
    pub fn slide_text(xml: &str) -> String {
        xml.split("</a:p>")
            .map(|paragraph| {
                TEXT_RUN
                    .captures_iter(paragraph)
                    .map(|caps| Self::unescape(&caps[1]))
                    .collect::<String>()
            })
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn extract_markdown(bytes: Bytes) -> anyhow::Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
        let mut slides: Vec<(usize, String)> = Vec::new();

        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            let number = match SLIDE_ENTRY
                .captures(entry.name())
                .and_then(|caps| caps[1].parse::<usize>().ok())
            {
                Some(number) => number,
                None => continue,
            };

            let mut xml = String::new();
            entry.read_to_string(&mut xml)?;
            slides.push((number, Self::slide_text(&xml)));
        }

        slides.sort_by_key(|(number, _)| *number);

        let sections: Vec<String> = slides
            .into_iter()
            .map(|(number, text)| format!("## Slide {}\n\n{}", number, text))
            .collect();

        Ok(normalize_markdown(&sections.join("\n\n")))
    }
}

impl Default for PresentationPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentPipeline for PresentationPipeline {
    fn name(&self) -> &'static str {
        "pptx"
    }

    async fn convert(&self, document: &ValidatedDocument) -> anyhow::Result<PipelineOutput> {
        let bytes = document.bytes.clone();
        let markdown = tokio::task::spawn_blocking(move || Self::extract_markdown(bytes)).await??;

        Ok(PipelineOutput {
            markdown,
            mimetype: Some(PPTX_CONTENT_TYPE.to_string()),
        })
    }
}
