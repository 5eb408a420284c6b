//! Content-based MIME classification.
//!
//! Only the bytes are inspected. Client-supplied filenames and content-type
//! headers are never consulted, so a renamed file cannot sneak past the
//! accepted format registry.

use once_cell::sync::Lazy;
use regex::Regex;

pub const TEXT_MARKDOWN: &str = "text/markdown";

static ATX_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,6}\s+\S").unwrap());

/// How many leading bytes the text heuristics look at.
const TEXT_PROBE_LEN: usize = 8 * 1024;

/// Best-effort MIME type of `bytes`. Never fails; unknown content is
/// `application/octet-stream`.
pub fn classify(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return mime::APPLICATION_OCTET_STREAM.to_string();
    }

    if let Some(kind) = infer::get(bytes) {
        return match kind.mime_type() {
            "application/zip" => ooxml_type(bytes)
                .map(str::to_string)
                .unwrap_or_else(|| kind.mime_type().to_string()),
            other => other.to_string(),
        };
    }

    match as_text(bytes) {
        Some(text) => classify_text(text),
        None => mime::APPLICATION_OCTET_STREAM.to_string(),
    }
}

/// Office Open XML containers are zips; the part names in the local file
/// headers tell them apart.
fn ooxml_type(bytes: &[u8]) -> Option<&'static str> {
    const PARTS: [(&[u8], &str); 3] = [
        (
            b"word/document.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ),
        (
            b"ppt/presentation.xml",
            "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        ),
        (
            b"xl/workbook.xml",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        ),
    ];

    PARTS
        .iter()
        .find(|(part, _)| bytes.windows(part.len()).any(|window| window == *part))
        .map(|(_, content_type)| *content_type)
}

/// Full buffer as UTF-8 when it looks like text (no NULs).
fn as_text(bytes: &[u8]) -> Option<&str> {
    if bytes.contains(&0) {
        return None;
    }
    std::str::from_utf8(bytes).ok()
}

fn classify_text(text: &str) -> String {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let probe = head(text, TEXT_PROBE_LEN);
    let trimmed = probe.trim_start();

    if looks_like_html(trimmed) {
        mime::TEXT_HTML.to_string()
    } else if looks_like_markdown(trimmed) {
        TEXT_MARKDOWN.to_string()
    } else if looks_like_json(text) {
        mime::APPLICATION_JSON.to_string()
    } else if looks_like_csv(probe) {
        mime::TEXT_CSV.to_string()
    } else {
        mime::TEXT_PLAIN.to_string()
    }
}

fn head(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

fn looks_like_html(trimmed: &str) -> bool {
    let lower = head(trimmed, 512).to_ascii_lowercase();
    lower.starts_with("<!doctype html")
        || lower.starts_with("<html")
        || (lower.starts_with("<?xml") && lower.contains("<html"))
        || lower.starts_with("<head")
        || lower.starts_with("<body")
}

fn looks_like_markdown(trimmed: &str) -> bool {
    let first_line = trimmed.lines().next().unwrap_or_default();
    if ATX_HEADING.is_match(first_line) {
        return true;
    }
    // YAML front matter followed by a closing fence.
    first_line.trim_end() == "---" && trimmed.lines().skip(1).any(|l| l.trim_end() == "---")
}

fn looks_like_json(text: &str) -> bool {
    let trimmed = text.trim();
    let wrapped = (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'));
    wrapped && serde_json::from_str::<serde_json::Value>(trimmed).is_ok()
}

/// At least two non-empty lines, each with the same non-zero number of commas.
fn looks_like_csv(probe: &str) -> bool {
    let mut lines = probe.lines().filter(|l| !l.trim().is_empty());
    // The probe may cut the final line short.
    let lines: Vec<&str> = if probe.len() >= TEXT_PROBE_LEN {
        let mut collected: Vec<&str> = lines.by_ref().collect();
        collected.pop();
        collected
    } else {
        lines.collect()
    };

    if lines.len() < 2 {
        return false;
    }
    let columns = lines[0].matches(',').count();
    columns > 0 && lines.iter().all(|line| line.matches(',').count() == columns)
}
