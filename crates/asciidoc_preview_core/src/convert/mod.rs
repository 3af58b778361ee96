//! Conversion dispatch: from raw document text to converted HTML.
//!
//! The actual AsciiDoc-to-HTML transformation is owned by an external
//! converter. This module builds the conversion request (front matter
//! stripped, base directory resolved, renderer attributes populated), hands
//! it to a long-lived conversion worker, and applies a couple of known
//! post-processing fixups to the returned markup.

mod converter;
pub mod fixups;
mod service;

pub use converter::{AsciidoctorConverter, ConvertError, Converter, RawConversion};
pub use service::ConversionService;

use crate::assets::AssetRoot;
use crate::frontmatter::strip_front_matter;
use crate::preferences::{Doctype, RenderPreferences, SafeMode};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Characters escaped when a filesystem path is turned into a `file://` URL.
pub(crate) const FILE_URL_ESCAPES: &AsciiSet =
    &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>').add(b'`');

/// A single conversion request. Immutable once built; constructed fresh for
/// every conversion call. The serialized field names are the converter wire
/// protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionRequest {
    /// Document text with any leading front matter already removed.
    #[serde(rename = "docText")]
    pub source_text: String,
    /// Directory containing the running application.
    #[serde(rename = "cwd")]
    pub working_directory: String,
    /// Base directory for resolving includes and relative assets, as a
    /// URL-style path with no trailing slash.
    #[serde(rename = "basedir")]
    pub base_directory: String,
    #[serde(rename = "safemode")]
    pub safe_mode: SafeMode,
    pub doctype: Doctype,
    #[serde(rename = "header_footer")]
    pub include_header_footer: bool,
    /// Renderer attributes as ordered (name, value) pairs; an empty value
    /// denotes a bare flag.
    pub attributes: Vec<(String, String)>,
}

/// The outcome of one conversion, ready for page assembly. Exactly one
/// result corresponds to exactly one [`ConversionRequest`].
#[derive(Debug, Clone)]
pub struct ConversionResult {
    /// Converted document body.
    pub body_html: String,
    /// Whether the document contains math notation requiring a client-side
    /// typesetting pass.
    pub uses_math: bool,
    /// Converter diagnostics, in emission order.
    pub diagnostic_messages: Vec<String>,
}

/// Build a conversion request from document text and preferences.
///
/// The base directory is the explicit `basedir` preference when set,
/// otherwise the directory containing the document as a `file://` URL with
/// no trailing slash.
pub fn build_request(
    text: &str,
    doc_path: &Path,
    preferences: &RenderPreferences,
    assets: &AssetRoot,
) -> ConversionRequest {
    let base_directory = preferences
        .basedir
        .clone()
        .unwrap_or_else(|| document_dir_url(doc_path));

    ConversionRequest {
        source_text: strip_front_matter(text).to_string(),
        working_directory: application_dir(),
        base_directory,
        safe_mode: preferences.safemode,
        doctype: preferences.doctype,
        include_header_footer: true,
        attributes: build_attributes(preferences, assets),
    }
}

/// Renderer attributes passed along with every request: icon font mode, the
/// fixed platform/environment tag pairs, the `linkcss` flag, and the
/// resolved theme stylesheet URL, plus the attributes derived from the
/// optional preferences.
fn build_attributes(preferences: &RenderPreferences, assets: &AssetRoot) -> Vec<(String, String)> {
    let mut attributes = vec![
        ("icons".to_string(), "font@".to_string()),
        ("platform".to_string(), "opal".to_string()),
        ("platform-opal".to_string(), String::new()),
        ("env".to_string(), "browser".to_string()),
        ("env-browser".to_string(), String::new()),
        ("linkcss".to_string(), String::new()),
        (
            "stylesheet".to_string(),
            assets.theme_css(&preferences.theme),
        ),
    ];

    if let Some(imagesdir) = &preferences.imagesdir {
        attributes.push(("imagesdir".to_string(), imagesdir.clone()));
    }
    if preferences.showtitle {
        attributes.push(("showtitle".to_string(), String::new()));
    }
    if preferences.numbered {
        attributes.push(("sectnums".to_string(), String::new()));
    }

    attributes
}

/// Directory of the running executable, used as the worker's working
/// directory.
fn application_dir() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.display().to_string()))
        .unwrap_or_else(|| ".".to_string())
}

/// Directory containing the document, expressed as a `file://` URL with no
/// trailing slash.
pub fn document_dir_url(doc_path: &Path) -> String {
    let dir = doc_path
        .parent()
        .map(|dir| dir.display().to_string())
        .unwrap_or_default();
    let dir = dir.replace('\\', "/");
    let encoded = utf8_percent_encode(dir.trim_end_matches('/'), FILE_URL_ESCAPES);
    format!("file://{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assets() -> AssetRoot {
        AssetRoot::new("file:///ext")
    }

    fn attribute<'a>(request: &'a ConversionRequest, name: &str) -> Option<&'a str> {
        request
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_request_strips_front_matter() {
        let request = build_request(
            "---\ntitle: x\n---\n= Doc",
            Path::new("/docs/doc.adoc"),
            &RenderPreferences::default(),
            &assets(),
        );
        assert_eq!(request.source_text, "= Doc");
    }

    #[test]
    fn test_base_directory_defaults_to_document_dir() {
        let request = build_request(
            "= Doc",
            Path::new("/docs/guide/doc.adoc"),
            &RenderPreferences::default(),
            &assets(),
        );
        assert_eq!(request.base_directory, "file:///docs/guide");
        assert!(!request.base_directory.ends_with('/'));
    }

    #[test]
    fn test_base_directory_preference_wins() {
        let prefs = RenderPreferences {
            basedir: Some("file:///elsewhere".to_string()),
            ..Default::default()
        };
        let request = build_request("= Doc", Path::new("/docs/doc.adoc"), &prefs, &assets());
        assert_eq!(request.base_directory, "file:///elsewhere");
    }

    #[test]
    fn test_document_dir_url_escapes_spaces() {
        let url = document_dir_url(Path::new("/my docs/doc.adoc"));
        assert_eq!(url, "file:///my%20docs");
    }

    #[test]
    fn test_fixed_attributes_always_present() {
        let request = build_request(
            "= Doc",
            Path::new("/docs/doc.adoc"),
            &RenderPreferences::default(),
            &assets(),
        );
        assert_eq!(attribute(&request, "icons"), Some("font@"));
        assert_eq!(attribute(&request, "platform"), Some("opal"));
        assert_eq!(attribute(&request, "platform-opal"), Some(""));
        assert_eq!(attribute(&request, "env"), Some("browser"));
        assert_eq!(attribute(&request, "env-browser"), Some(""));
        assert_eq!(attribute(&request, "linkcss"), Some(""));
        assert_eq!(
            attribute(&request, "stylesheet"),
            Some("file:///ext/themes/default.css")
        );
    }

    #[test]
    fn test_preference_derived_attributes() {
        let prefs = RenderPreferences {
            imagesdir: Some("/docs/images".to_string()),
            numbered: true,
            showtitle: false,
            ..Default::default()
        };
        let request = build_request("= Doc", Path::new("/docs/doc.adoc"), &prefs, &assets());
        assert_eq!(attribute(&request, "imagesdir"), Some("/docs/images"));
        assert_eq!(attribute(&request, "sectnums"), Some(""));
        assert_eq!(attribute(&request, "showtitle"), None);
    }

    #[test]
    fn test_request_wire_format() {
        let request = build_request(
            "= Doc",
            Path::new("/docs/doc.adoc"),
            &RenderPreferences::default(),
            &assets(),
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["docText"], "= Doc");
        assert_eq!(json["basedir"], "file:///docs");
        assert_eq!(json["safemode"], "safe");
        assert_eq!(json["doctype"], "article");
        assert_eq!(json["header_footer"], true);
        assert!(json["cwd"].is_string());
    }
}
