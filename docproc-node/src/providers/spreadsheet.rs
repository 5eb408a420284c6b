use crate::models::ValidatedDocument;
use crate::providers::{normalize_markdown, pipe_table, DocumentPipeline, PipelineOutput};
use async_trait::async_trait;
use bytes::Bytes;
use calamine::{open_workbook_from_rs, Reader, Xlsx};
use std::io::Cursor;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub struct SpreadsheetPipeline;

impl SpreadsheetPipeline {
    pub fn new() -> Self {
        Self
    }

    fn extract_markdown(bytes: Bytes) -> anyhow::Result<String> {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
        let mut sections = Vec::new();

        for name in workbook.sheet_names() {
            let range = workbook.worksheet_range(&name)?;
            let rows: Vec<Vec<String>> = range
                .rows()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<_>>())
                .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
                .collect();

            if rows.is_empty() {
                sections.push(format!("## {}", name));
            } else {
                sections.push(format!("## {}\n\n{}", name, pipe_table(&rows)));
            }
        }

        Ok(normalize_markdown(&sections.join("\n\n")))
    }
}

impl Default for SpreadsheetPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentPipeline for SpreadsheetPipeline {
    fn name(&self) -> &'static str {
        "xlsx"
    }

    async fn convert(&self, document: &ValidatedDocument) -> anyhow::Result<PipelineOutput> {
        let bytes = document.bytes.clone();
        let markdown = tokio::task::spawn_blocking(move || Self::extract_markdown(bytes)).await??;

        Ok(PipelineOutput {
            markdown,
            mimetype: Some(XLSX_CONTENT_TYPE.to_string()),
        })
    }
}
