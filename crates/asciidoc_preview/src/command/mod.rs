pub mod export;
pub mod render;

use anyhow::{Context, Result};
use asciidoc_preview_core::{assemble_page, RenderedPage};
use crate::app::Args;
use std::path::Path;

/// Run the whole pipeline for one document: read, convert, assemble.
pub async fn render_document(args: &Args, file: &Path, scroll: usize) -> Result<RenderedPage> {
    let preferences = args.preferences();
    let service = args.open_conversion_service()?;

    let text = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;

    let result = service.convert(&text, file, &preferences).await?;

    for message in &result.diagnostic_messages {
        tracing::warn!(%message, "Converter diagnostic");
    }

    let base_url = preview_base_url(&preferences, file);
    Ok(assemble_page(
        &result,
        &base_url,
        scroll,
        &preferences,
        service.assets(),
    ))
}

/// Base URL of the assembled page: the explicit base directory preference
/// when set, otherwise the document's directory, with a trailing slash so
/// relative links resolve inside it.
fn preview_base_url(
    preferences: &asciidoc_preview_core::RenderPreferences,
    file: &Path,
) -> String {
    let base = preferences
        .basedir
        .clone()
        .unwrap_or_else(|| asciidoc_preview_core::convert::document_dir_url(file));
    format!("{}/", base.trim_end_matches('/'))
}
