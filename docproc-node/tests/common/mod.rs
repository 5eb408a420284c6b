#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{self, Request, Response},
    Router,
};
use docproc_node::{
    api::{self, AppState, API_KEY_HEADER},
    config::Settings,
    models::ValidatedDocument,
    services::{ExtractedPage, PageExtractor, TokenCounter},
};
use lopdf::{
    content::{Content, Operation},
    dictionary, Document, Object, Stream,
};
use once_cell::sync::Lazy;
use std::sync::Arc;

pub const API_KEY: &str = "test-secret";
pub const BOUNDARY: &str = "docproc-test-boundary";

static TOKENS: Lazy<Arc<TokenCounter>> =
    Lazy::new(|| Arc::new(TokenCounter::new().expect("vocabularies should load")));

/// Returns canned pages, or fails when given none.
#[derive(Default)]
pub struct StaticExtractor {
    pub pages: Vec<ExtractedPage>,
}

impl StaticExtractor {
    pub fn with_pages(pages: &[(usize, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(page_number, content)| ExtractedPage {
                    page_number: *page_number,
                    content: content.to_string(),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl PageExtractor for StaticExtractor {
    async fn extract_pages(
        &self,
        _document: &ValidatedDocument,
    ) -> anyhow::Result<Vec<ExtractedPage>> {
        anyhow::ensure!(!self.pages.is_empty(), "vision provider returned nothing");
        Ok(self.pages.clone())
    }
}

pub fn settings() -> Settings {
    Settings::with_api_key(API_KEY)
}

pub fn app_with(settings: Settings, extractor: StaticExtractor) -> Router {
    api::create_router(AppState::new(settings, TOKENS.clone(), Arc::new(extractor)))
}

pub fn app() -> Router {
    app_with(settings(), StaticExtractor::default())
}

pub fn file_part(filename: Option<&str>, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let disposition = match filename {
        Some(filename) => format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            filename
        ),
        None => "Content-Disposition: form-data; name=\"file\"\r\n".to_string(),
    };

    let mut part = format!(
        "--{}\r\n{}Content-Type: {}\r\n\r\n",
        BOUNDARY, disposition, content_type
    )
    .into_bytes();
    part.extend_from_slice(bytes);
    part.extend_from_slice(b"\r\n");
    part
}

pub fn text_part(name: &str, value: &str) -> Vec<u8> {
    format!(
        "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
        BOUNDARY, name, value
    )
    .into_bytes()
}

pub fn multipart_body(parts: &[Vec<u8>]) -> Vec<u8> {
    let mut body = parts.concat();
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn document_request(api_key: Option<&str>, parts: &[Vec<u8>]) -> Request<Body> {
    let mut builder = Request::builder()
        .method(http::Method::POST)
        .uri("/process/document")
        .header(
            http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        );
    if let Some(key) = api_key {
        builder = builder.header(API_KEY_HEADER, key);
    }
    builder.body(Body::from(multipart_body(parts))).unwrap()
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Single-page PDF with one line of Helvetica text.
pub fn sample_pdf(text: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 18.into()]),
            Operation::new("Td", vec![72.into(), 700.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}
