//! Export the assembled page to a file and open it in the system browser.

use crate::convert::FILE_URL_ESCAPES;
use percent_encoding::utf8_percent_encode;
use std::path::{Path, PathBuf};

/// Error type for export operations.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Writing the exported page failed. The browser is not opened in this
    /// case.
    #[error("failed to write exported page: {0}")]
    Write(#[from] std::io::Error),

    /// The page was written but the browser could not be launched.
    #[error("failed to open browser: {0}")]
    Browser(std::io::Error),
}

/// Path of the exported page: a sibling file named
/// `<originalDocumentPath>_brackets.html`.
pub fn exported_page_path(doc_path: &Path) -> PathBuf {
    let mut exported = doc_path.as_os_str().to_os_string();
    exported.push("_brackets.html");
    PathBuf::from(exported)
}

/// Write the assembled page next to the document, overwriting any previous
/// export. Returns the path of the written file.
pub fn write_exported_page(doc_path: &Path, html: &str) -> Result<PathBuf, ExportError> {
    let target = exported_page_path(doc_path);
    std::fs::write(&target, html)?;
    tracing::debug!(target = %target.display(), "Wrote exported page");
    Ok(target)
}

/// Export the assembled page and open it via the platform's default
/// browser. The browser step never runs when the write fails.
pub fn export_to_browser(doc_path: &Path, html: &str) -> Result<PathBuf, ExportError> {
    let target = write_exported_page(doc_path, html)?;
    webbrowser::open(&file_url(&target)).map_err(ExportError::Browser)?;
    Ok(target)
}

fn file_url(path: &Path) -> String {
    let path = path.display().to_string().replace('\\', "/");
    let encoded = utf8_percent_encode(path.trim_start_matches('/'), FILE_URL_ESCAPES);
    format!("file:///{encoded}")
}
