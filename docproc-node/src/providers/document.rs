use crate::models::ValidatedDocument;
use crate::providers::{normalize_markdown, pipe_table, DocumentPipeline, PipelineOutput};
use async_trait::async_trait;
use docx_rs::{
    read_docx, DocumentChild, Docx, Paragraph, ParagraphChild, RunChild, Table, TableCellContent,
    TableChild, TableRowChild,
};

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

pub struct DocxPipeline;

impl DocxPipeline {
    pub fn new() -> Self {
        Self
    }

    fn paragraph_text(paragraph: &Paragraph) -> String {
        let mut text = String::new();
        for child in &paragraph.children {
            if let ParagraphChild::Run(run) = child {
                for run_child in &run.children {
                    if let RunChild::Text(t) = run_child {
                        text.push_str(&t.text);
                    }
                }
            }
        }
        text
    }

    /// Maps `Heading1`..`Heading6` (and `Title`) paragraph styles to ATX levels.
    fn heading_level(paragraph: &Paragraph) -> Option<usize> {
        let style = paragraph.property.style.as_ref()?;
        let name = style.val.to_ascii_lowercase().replace(' ', "");
        if name == "title" {
            return Some(1);
        }
        name.strip_prefix("heading")
            .and_then(|level| level.parse::<usize>().ok())
            .filter(|level| (1..=6).contains(level))
    }

    #[allow(irrefutable_let_patterns)]
    fn table_markdown(table: &Table) -> String {
        let mut rows = Vec::new();
        for row in &table.rows {
            let TableChild::TableRow(row) = row else {
                continue;
            };
            let mut cells = Vec::new();
            for cell in &row.cells {
                if let TableRowChild::TableCell(cell) = cell {
                    let text: Vec<String> = cell
                        .children
                        .iter()
                        .filter_map(|content| match content {
                            TableCellContent::Paragraph(p) => Some(Self::paragraph_text(p)),
                            _ => None,
                        })
                        .filter(|text| !text.trim().is_empty())
                        .collect();
                    cells.push(text.join(" "));
                }
            }
            rows.push(cells);
        }
        pipe_table(&rows)
    }

    fn extract_markdown(docx: &Docx) -> String {
        let mut blocks = Vec::new();

        for child in &docx.document.children {
            match child {
                DocumentChild::Paragraph(p) => {
                    let text = Self::paragraph_text(p);
                    let text = text.trim();
                    if text.is_empty() {
                        continue;
                    }
                    match Self::heading_level(p) {
                        Some(level) => blocks.push(format!("{} {}", "#".repeat(level), text)),
                        None => blocks.push(text.to_string()),
                    }
                }
                DocumentChild::Table(table) => {
                    let rendered = Self::table_markdown(table);
                    if !rendered.is_empty() {
                        blocks.push(rendered);
                    }
                }
                _ => {}
            }
        }

        normalize_markdown(&blocks.join("\n\n"))
    }
}

impl Default for DocxPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentPipeline for DocxPipeline {
    fn name(&self) -> &'static str {
        "docx"
    }

    async fn convert(&self, document: &ValidatedDocument) -> anyhow::Result<PipelineOutput> {
        let bytes = document.bytes.clone();
        let markdown = tokio::task::spawn_blocking(move || -> anyhow::Result<String> {
            let docx = read_docx(&bytes)?;
            Ok(Self::extract_markdown(&docx))
        })
        .await??;

        Ok(PipelineOutput {
            markdown,
            mimetype: Some(DOCX_CONTENT_TYPE.to_string()),
        })
    }
}
