use crate::app::Args;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Converts a document and writes the assembled preview page.
#[derive(Parser, Debug, Clone)]
pub struct Render {
    /// Path to the AsciiDoc document.
    pub file: PathBuf,

    /// Write the assembled page to this file instead of stdout.
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Scroll offset restored when the page loads.
    #[clap(long, default_value = "0")]
    pub scroll: usize,
}

impl Render {
    pub async fn run(&self, args: Args) -> Result<()> {
        let page = super::render_document(&args, &self.file, self.scroll).await?;

        match &self.output {
            Some(output) => {
                tokio::fs::write(output, &page.html_document)
                    .await
                    .with_context(|| format!("failed to write {}", output.display()))?;
                tracing::info!(output = %output.display(), "Wrote preview page");
            }
            None => println!("{}", page.html_document),
        }

        Ok(())
    }
}
