pub mod document;
pub mod html;
pub mod image;
pub mod markdown;
pub mod pdf;
pub mod presentation;
pub mod registry;
pub mod spreadsheet;

#[cfg(test)]
mod tests;

use crate::models::ValidatedDocument;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

/// What a structural pipeline hands back before the router shapes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    pub markdown: String,
    pub mimetype: Option<String>,
}

/// A format-specific structural converter producing Markdown.
#[async_trait]
pub trait DocumentPipeline: Send + Sync {
    fn name(&self) -> &'static str;

    async fn convert(&self, document: &ValidatedDocument) -> anyhow::Result<PipelineOutput>;
}

static TRAILING_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+\n").unwrap());
static EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Shared clean-up applied to every pipeline's output.
pub fn normalize_markdown(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n").replace('\x0c', "\n\n");
    let text = TRAILING_SPACES.replace_all(&text, "\n");
    let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Renders rows as a pipe table, treating the first row as the header.
pub fn pipe_table(rows: &[Vec<String>]) -> String {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if width == 0 {
        return String::new();
    }

    let render_row = |row: &Vec<String>| {
        let cells: Vec<String> = (0..width)
            .map(|i| {
                row.get(i)
                    .map(|cell| cell.replace('|', "\\|").replace('\n', " ").trim().to_string())
                    .unwrap_or_default()
            })
            .collect();
        format!("| {} |", cells.join(" | "))
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(render_row(&rows[0]));
    lines.push(format!("|{}", "---|".repeat(width)));
    lines.extend(rows[1..].iter().map(render_row));
    lines.join("\n")
}
