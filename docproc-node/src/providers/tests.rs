#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::models::{ProcessingMode, ValidatedDocument};
    use bytes::Bytes;
    use std::io::{Cursor, Write};

    fn validated(bytes: impl Into<Bytes>, content_type: &str) -> ValidatedDocument {
        ValidatedDocument {
            bytes: bytes.into(),
            filename: "sample".to_string(),
            content_type: content_type.to_string(),
            mode: ProcessingMode::Standard,
        }
    }

    #[test]
    fn test_normalize_markdown() {
        let input = "\r\n# Title  \r\n\r\n\r\n\r\nBody text\t\n\x0cNext page\n\n\n";
        assert_eq!(normalize_markdown(input), "# Title\n\nBody text\n\nNext page");
    }

    #[test]
    fn test_pipe_table_pads_and_escapes() {
        let rows = vec![
            vec!["Name".to_string(), "Value".to_string()],
            vec!["a|b".to_string()],
        ];
        assert_eq!(
            pipe_table(&rows),
            "| Name | Value |\n|---|---|\n| a\\|b |  |"
        );
        assert_eq!(pipe_table(&[]), "");
    }

    mod pdf_pipeline_tests {
        use super::*;
        use super::super::super::pdf::PdfPipeline;
        use lopdf::content::{Content, Operation};
        use lopdf::{dictionary, Document, Object, Stream};

        fn sample_pdf(text: &str) -> Vec<u8> {
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
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
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

        #[tokio::test]
        async fn test_pdf_pipeline_extracts_text() {
            let pipeline = PdfPipeline::new();
            let document = validated(sample_pdf("Quarterly report"), "application/pdf");

            let output = pipeline.convert(&document).await.unwrap();

            assert!(output.markdown.contains("Quarterly"), "got: {}", output.markdown);
            assert_eq!(output.mimetype.as_deref(), Some("application/pdf"));
        }

        #[tokio::test]
        async fn test_pdf_pipeline_rejects_garbage() {
            let pipeline = PdfPipeline::new();
            let document = validated(&b"%PDF-1.4 not really a pdf"[..], "application/pdf");

            assert!(pipeline.convert(&document).await.is_err());
        }
    }

    mod docx_pipeline_tests {
        use super::*;
        use super::super::super::document::DocxPipeline;
        use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};

        fn cell(text: &str) -> TableCell {
            TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)))
        }

        fn sample_docx() -> Vec<u8> {
            let mut cursor = Cursor::new(Vec::new());
            Docx::new()
                .add_paragraph(
                    Paragraph::new()
                        .add_run(Run::new().add_text("Annual Summary"))
                        .style("Heading1"),
                )
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Revenue grew.")))
                .add_table(Table::new(vec![
                    TableRow::new(vec![cell("Year"), cell("Total")]),
                    TableRow::new(vec![cell("2024"), cell("42")]),
                ]))
                .build()
                .pack(&mut cursor)
                .unwrap();
            cursor.into_inner()
        }

        #[tokio::test]
        async fn test_docx_pipeline_headings_paragraphs_tables() {
            let pipeline = DocxPipeline::new();
            let document = validated(
                sample_docx(),
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            );

            let output = pipeline.convert(&document).await.unwrap();

            assert!(output.markdown.starts_with("# Annual Summary"), "got: {}", output.markdown);
            assert!(output.markdown.contains("Revenue grew."));
            assert!(output.markdown.contains("| Year | Total |"));
            assert!(output.markdown.contains("| 2024 | 42 |"));
        }

        #[tokio::test]
        async fn test_docx_pipeline_rejects_garbage() {
            let pipeline = DocxPipeline::new();
            let document = validated(&b"PK\x03\x04 broken"[..], "application/zip");

            assert!(pipeline.convert(&document).await.is_err());
        }
    }

    mod html_pipeline_tests {
        use super::*;
        use super::super::super::html::HtmlPipeline;

        #[test]
        fn test_html_to_markdown_structure() {
            let html = r#"
                <!DOCTYPE html>
                <html>
                <head><title>Ignored</title><style>.x { color: red; }</style></head>
                <body>
                    <h1>Hello   World</h1>
                    <p>This is a
                       paragraph.</p>
                    <ul>
                        <li>Item 1</li>
                        <li>Item 2</li>
                    </ul>
                    <script>var hidden = 1;</script>
                </body>
                </html>
            "#;

            let markdown = HtmlPipeline::to_markdown(html);

            assert!(markdown.starts_with("# Hello World"), "got: {}", markdown);
            assert!(markdown.contains("This is a paragraph."));
            assert!(markdown.contains("- Item 1"));
            assert!(markdown.contains("- Item 2"));
            assert!(!markdown.contains("hidden"));
            assert!(!markdown.contains("color"));
            assert!(!markdown.contains("Ignored"));
        }

        #[tokio::test]
        async fn test_html_pipeline_reports_mimetype() {
            let pipeline = HtmlPipeline::new();
            let document = validated(&b"<html><body><h2>Sub</h2></body></html>"[..], "text/html");

            let output = pipeline.convert(&document).await.unwrap();

            assert_eq!(output.markdown, "## Sub");
            assert_eq!(output.mimetype.as_deref(), Some("text/html"));
        }
    }

    mod markdown_pipeline_tests {
        use super::*;
        use super::super::super::markdown::MarkdownPipeline;

        #[tokio::test]
        async fn test_markdown_pass_through() {
            let pipeline = MarkdownPipeline::new();
            let document = validated(
                "\u{feff}# Title\n\nSome *markdown*  \n\n\n\nEnd\n".as_bytes().to_vec(),
                "text/markdown",
            );

            let output = pipeline.convert(&document).await.unwrap();

            assert_eq!(output.markdown, "# Title\n\nSome *markdown*\n\nEnd");
            assert_eq!(output.mimetype.as_deref(), Some("text/markdown"));
        }

        #[tokio::test]
        async fn test_plain_text_reports_its_content_type() {
            let pipeline = MarkdownPipeline::new();
            let document = validated(&b"just words"[..], "text/plain");

            let output = pipeline.convert(&document).await.unwrap();

            assert_eq!(output.markdown, "just words");
            assert_eq!(output.mimetype.as_deref(), Some("text/plain"));
        }
    }

    mod image_pipeline_tests {
        use super::*;
        use super::super::super::image::{ImagePipeline, IMAGE_PLACEHOLDER};

        #[tokio::test]
        async fn test_image_placeholder() {
            let pipeline = ImagePipeline::new();
            let document = validated(&b"\x89PNG\r\n\x1a\n"[..], "image/png");

            let output = pipeline.convert(&document).await.unwrap();

            assert_eq!(output.markdown, IMAGE_PLACEHOLDER);
            assert_eq!(output.mimetype.as_deref(), Some("image/png"));
        }
    }

    mod presentation_pipeline_tests {
        use super::*;
        use super::super::super::presentation::PresentationPipeline;
        use zip::write::SimpleFileOptions;

        fn slide(texts: &[&str]) -> String {
            let paragraphs: String = texts
                .iter()
                .map(|t| format!("<a:p><a:r><a:rPr lang=\"en-US\"/><a:t>{}</a:t></a:r></a:p>", t))
                .collect();
            format!("<p:sld><p:cSld><p:spTree>{}</p:spTree></p:cSld></p:sld>", paragraphs)
        }

        fn sample_pptx() -> Vec<u8> {
            let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
            let options = SimpleFileOptions::default();
            // Written out of order on purpose; slide numbers decide the output order.
            for (name, body) in [
                ("ppt/slides/slide10.xml", slide(&["Closing"])),
                ("ppt/slides/slide2.xml", slide(&["Agenda", "Q&amp;A"])),
                ("ppt/slides/slide1.xml", slide(&["Welcome"])),
                ("ppt/slides/_rels/slide1.xml.rels", "<Relationships/>".to_string()),
            ] {
                writer.start_file(name, options).unwrap();
                writer.write_all(body.as_bytes()).unwrap();
            }
            writer.finish().unwrap().into_inner()
        }

        #[test]
        fn test_slide_text_splits_paragraphs() {
            let xml = r#"<a:p><a:r><a:t>Hello </a:t></a:r><a:r><a:t xml:space="preserve">there</a:t></a:r></a:p><a:p><a:r><a:t>&lt;b&gt;</a:t></a:r></a:p>"#;
            assert_eq!(PresentationPipeline::slide_text(xml), "Hello there\n\n<b>");
        }

        #[tokio::test]
        async fn test_presentation_slides_in_order() {
            let pipeline = PresentationPipeline::new();
            let document = validated(
                sample_pptx(),
                "application/vnd.openxmlformats-officedocument.presentationml.presentation",
            );

            let output = pipeline.convert(&document).await.unwrap();

            assert_eq!(
                output.markdown,
                "## Slide 1\n\nWelcome\n\n## Slide 2\n\nAgenda\n\nQ&A\n\n## Slide 10\n\nClosing"
            );
        }
    }

    mod spreadsheet_pipeline_tests {
        use super::*;
        use super::super::super::spreadsheet::SpreadsheetPipeline;

        const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";

        fn sample_xlsx() -> Vec<u8> {
            let workbook = format!(
                r#"<workbook xmlns="{}" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Sales" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
                MAIN_NS
            );
            let rels = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;
            let sheet = format!(
                r#"<worksheet xmlns="{}"><sheetData><row r="1"><c r="A1" t="inlineStr"><is><t>Region</t></is></c><c r="B1" t="inlineStr"><is><t>Total</t></is></c></row><row r="2"><c r="A2" t="inlineStr"><is><t>North</t></is></c><c r="B2" t="inlineStr"><is><t>42</t></is></c></row></sheetData></worksheet>"#,
                MAIN_NS
            );

            let mut buffer = Cursor::new(Vec::new());
            {
                let mut zip = zip::ZipWriter::new(&mut buffer);
                let options = zip::write::SimpleFileOptions::default();
                for (name, body) in [
                    ("xl/workbook.xml", workbook.as_str()),
                    ("xl/_rels/workbook.xml.rels", rels),
                    ("xl/worksheets/sheet1.xml", sheet.as_str()),
                ] {
                    zip.start_file(name, options).unwrap();
                    zip.write_all(body.as_bytes()).unwrap();
                }
                zip.finish().unwrap();
            }
            buffer.into_inner()
        }

        #[tokio::test]
        async fn test_spreadsheet_sheet_becomes_table() {
            let pipeline = SpreadsheetPipeline::new();
            let document = validated(
                sample_xlsx(),
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            );

            let output = pipeline.convert(&document).await.unwrap();

            assert!(output.markdown.starts_with("## Sales"), "got: {}", output.markdown);
            assert!(output.markdown.contains("| Region | Total |"));
            assert!(output.markdown.contains("| North | 42 |"));
        }

        #[tokio::test]
        async fn test_spreadsheet_rejects_garbage() {
            let pipeline = SpreadsheetPipeline::new();
            let document = validated(
                b"not a workbook".to_vec(),
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            );

            assert!(pipeline.convert(&document).await.is_err());
        }
    }
}
