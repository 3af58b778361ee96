//! End-to-end pipeline tests with a fake converter standing in for the
//! external `asciidoctor` executable.

use asciidoc_preview_core::{
    assemble_page, AssetRoot, ConversionRequest, ConversionService, ConvertError, Converter,
    RawConversion, RenderPreferences,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Fake converter wrapping the document text in a paragraph with a link,
/// and reporting a diagnostic when the source mentions one.
struct FakeConverter;

impl Converter for FakeConverter {
    fn convert(&self, request: &ConversionRequest) -> Result<RawConversion, ConvertError> {
        let messages = if request.source_text.contains("bad-block") {
            vec!["asciidoctor: WARNING: line 42: invalid block".to_string()]
        } else {
            Vec::new()
        };
        Ok(RawConversion {
            html: r#"<p><a href="x.html">link</a></p>"#.to_string(),
            stem: false,
            messages,
        })
    }
}

fn service() -> ConversionService {
    ConversionService::open(
        Arc::new(FakeConverter),
        AssetRoot::new("file:///ext"),
        Duration::from_secs(5),
    )
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn renders_complete_page_from_source_text() {
    let service = service();
    let prefs = RenderPreferences::default();

    let result = service
        .convert("= Doc\n\nsome text", Path::new("/docs/doc.adoc"), &prefs)
        .await
        .unwrap();

    assert_eq!(result.body_html, r#"<p><a href="x.html">link</a></p>"#);
    assert!(!result.uses_math);
    assert!(result.diagnostic_messages.is_empty());

    let page = assemble_page(&result, "file:///docs/", 0, &prefs, service.assets());
    let html = &page.html_document;

    assert!(html.contains(r#"<base href="file:///docs/">"#));
    assert!(html.contains(r#"title="x.html""#));
    assert!(html.contains(r#"<body class="article""#));
    assert!(!html.contains("x-mathjax-config"));
    assert!(!html.contains("asciidoc-preview-console"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn diagnostics_surface_in_console_panel() {
    let service = service();
    let prefs = RenderPreferences::default();

    let result = service
        .convert(
            "= Doc\n\nbad-block here",
            Path::new("/docs/doc.adoc"),
            &prefs,
        )
        .await
        .unwrap();

    assert_eq!(result.diagnostic_messages.len(), 1);

    let page = assemble_page(&result, "file:///docs/", 0, &prefs, service.assets());
    let html = &page.html_document;

    assert!(html.contains("asciidoc-preview-console"));
    assert!(html.contains(r##"<a href="#goto_42">asciidoctor: WARNING: line 42: invalid block</a>"##));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn front_matter_never_reaches_the_converter() {
    /// Converter that fails loudly when it sees front matter.
    struct StrictConverter;
    impl Converter for StrictConverter {
        fn convert(&self, request: &ConversionRequest) -> Result<RawConversion, ConvertError> {
            if request.source_text.starts_with("---") {
                return Err(ConvertError::Failed("front matter leaked".to_string()));
            }
            Ok(RawConversion {
                html: format!("<p>{}</p>", request.source_text),
                ..Default::default()
            })
        }
    }

    let service = ConversionService::open(
        Arc::new(StrictConverter),
        AssetRoot::new("file:///ext"),
        Duration::from_secs(5),
    );

    let result = service
        .convert(
            "---\nlayout: post\n---\n= Doc",
            Path::new("/docs/doc.adoc"),
            &RenderPreferences::default(),
        )
        .await
        .unwrap();

    assert_eq!(result.body_html, "<p>= Doc</p>");
}
