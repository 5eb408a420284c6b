use crate::models::ValidatedDocument;
use crate::providers::{normalize_markdown, DocumentPipeline, PipelineOutput};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

pub struct HtmlPipeline;

impl HtmlPipeline {
    pub fn new() -> Self {
        Self
    }

    fn heading_level(tag: &str) -> Option<usize> {
        match tag {
            "h1" => Some(1),
            "h2" => Some(2),
            "h3" => Some(3),
            "h4" => Some(4),
            "h5" => Some(5),
            "h6" => Some(6),
            _ => None,
        }
    }

    fn inline_text(element: &ElementRef) -> String {
        let text: String = element.text().collect();
        WHITESPACE.replace_all(&text, " ").trim().to_string()
    }

    fn render_children(element: &ElementRef, out: &mut String) {
        for node in element.children() {
            if let Some(child) = ElementRef::wrap(node) {
                let tag = child.value().name();

                if matches!(tag, "script" | "style" | "noscript" | "head" | "template") {
                    continue;
                }

                if let Some(level) = Self::heading_level(tag) {
                    let text = Self::inline_text(&child);
                    if !text.is_empty() {
                        out.push_str(&format!("\n\n{} {}\n\n", "#".repeat(level), text));
                    }
                    continue;
                }

                match tag {
                    "br" => out.push('\n'),
                    "li" => {
                        out.push_str("\n- ");
                        Self::render_children(&child, out);
                    }
                    "p" | "div" | "section" | "article" | "main" | "ul" | "ol" | "table"
                    | "tr" | "blockquote" | "pre" => {
                        out.push_str("\n\n");
                        Self::render_children(&child, out);
                        out.push_str("\n\n");
                    }
                    "td" | "th" => {
                        out.push(' ');
                        Self::render_children(&child, out);
                    }
                    _ => Self::render_children(&child, out),
                }
            } else if let Some(text) = node.value().as_text() {
                let collapsed = WHITESPACE.replace_all(text, " ");
                if out.ends_with(char::is_whitespace) || out.is_empty() {
                    out.push_str(collapsed.trim_start());
                } else {
                    out.push_str(&collapsed);
                }
            }
        }
    }

    pub fn to_markdown(html: &str) -> String {
        let document = Html::parse_document(html);
        let body = Selector::parse("body")
            .ok()
            .and_then(|selector| document.select(&selector).next());

        let mut out = String::new();
        match body {
            Some(body) => Self::render_children(&body, &mut out),
            None => Self::render_children(&document.root_element(), &mut out),
        }

        // Lines only carry inline whitespace from collapsed text nodes at this point.
        let lines: Vec<&str> = out.lines().map(str::trim).collect();
        normalize_markdown(&lines.join("\n"))
    }
}

impl Default for HtmlPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentPipeline for HtmlPipeline {
    fn name(&self) -> &'static str {
        "html"
    }

    async fn convert(&self, document: &ValidatedDocument) -> anyhow::Result<PipelineOutput> {
        let html = String::from_utf8_lossy(&document.bytes);

        Ok(PipelineOutput {
            markdown: Self::to_markdown(&html),
            mimetype: Some("text/html".to_string()),
        })
    }
}
