use crate::command;
use anyhow::{anyhow, Result};
use asciidoc_preview_core::{
    load_preferences, AsciidoctorConverter, AssetRoot, ConversionService, Doctype,
    RenderPreferences, SafeMode,
};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
pub enum RunCmd {
    /// Convert a document and write the assembled preview page.
    #[clap(name = "render")]
    Render(command::render::Render),
    /// Convert a document, export the page next to it and open it in the
    /// system browser.
    #[clap(name = "export")]
    Export(command::export::Export),
}

/// AsciiDoc preview CLI arguments.
#[derive(Parser, Debug)]
pub struct Args {
    /// Theme stylesheet name.
    #[clap(long)]
    pub theme: Option<String>,

    /// Converter safe mode (unsafe, safe, server, secure).
    #[clap(long)]
    pub safe_mode: Option<SafeMode>,

    /// Document type (article, book, manpage).
    #[clap(long)]
    pub doctype: Option<Doctype>,

    /// Base directory for resolving includes and relative assets.
    #[clap(long)]
    pub base_dir: Option<String>,

    /// Root URL the bundled assets (themes, styles, scripts) resolve
    /// against. Defaults to the directory of the executable.
    #[clap(long)]
    pub asset_root: Option<String>,

    /// Abort a conversion that produced no response within this interval.
    #[clap(long, default_value = "30")]
    pub timeout_secs: u64,

    /// Enable the logging system.
    #[clap(long)]
    pub log: Option<PathBuf>,

    /// Specify the path of the preferences file.
    #[clap(long)]
    pub config_file: Option<PathBuf>,
}

impl Args {
    /// Load preferences from the configured file and apply the command-line
    /// overrides on top.
    pub fn preferences(&self) -> RenderPreferences {
        let mut preferences = match &self.config_file {
            Some(config_file) => {
                let loaded = load_preferences(config_file);
                if let Some(error) = loaded.maybe_error {
                    tracing::warn!(
                        ?error,
                        config_file = %loaded.file_path.display(),
                        "Ignoring malformed preferences file"
                    );
                }
                loaded.preferences
            }
            None => RenderPreferences::default(),
        };

        if let Some(theme) = &self.theme {
            preferences.theme = theme.clone();
        }
        if let Some(safe_mode) = self.safe_mode {
            preferences.safemode = safe_mode;
        }
        if let Some(doctype) = self.doctype {
            preferences.doctype = doctype;
        }
        if let Some(base_dir) = &self.base_dir {
            preferences.basedir = Some(base_dir.clone());
        }

        preferences
    }

    pub fn asset_root(&self) -> AssetRoot {
        let base = self.asset_root.clone().unwrap_or_else(|| {
            let exe_dir = std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(|dir| dir.display().to_string()))
                .unwrap_or_else(|| ".".to_string());
            format!("file://{}", exe_dir.replace('\\', "/"))
        });
        AssetRoot::new(base)
    }

    /// Open the conversion service backed by the system `asciidoctor`.
    pub fn open_conversion_service(&self) -> Result<ConversionService> {
        let converter = AsciidoctorConverter::locate()
            .map_err(|e| anyhow!("{e}; install asciidoctor to use the preview CLI"))?;
        Ok(ConversionService::open(
            Arc::new(converter),
            self.asset_root(),
            Duration::from_secs(self.timeout_secs),
        ))
    }
}

impl RunCmd {
    pub async fn run(self, args: Args) -> Result<()> {
        match self {
            Self::Render(render) => render.run(args).await,
            Self::Export(export) => export.run(args).await,
        }
    }
}
