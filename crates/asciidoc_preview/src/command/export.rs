use crate::app::Args;
use anyhow::Result;
use asciidoc_preview_core::export_to_browser;
use clap::Parser;
use std::path::PathBuf;

/// Converts a document, writes the page next to it and opens it in the
/// system browser.
#[derive(Parser, Debug, Clone)]
pub struct Export {
    /// Path to the AsciiDoc document.
    pub file: PathBuf,
}

impl Export {
    pub async fn run(&self, args: Args) -> Result<()> {
        let page = super::render_document(&args, &self.file, 0).await?;
        let exported = export_to_browser(&self.file, &page.html_document)?;
        tracing::info!(exported = %exported.display(), "Opened exported page in browser");
        Ok(())
    }
}
