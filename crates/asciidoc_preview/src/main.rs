//! Command-line front end for the AsciiDoc preview pipeline.
//!
//! Renders an AsciiDoc document into the same standalone preview page the
//! editor panel shows, either to stdout/file (`render`) or exported next to
//! the document and opened in the system browser (`export`).

mod app;
mod command;

use app::{Args, RunCmd};
use clap::Parser;
use std::io::IsTerminal;

#[derive(Parser, Debug)]
#[clap(name = "adoc-preview")]
pub struct AdocPreview {
    #[clap(flatten)]
    pub args: Args,

    #[clap(subcommand)]
    pub cmd: RunCmd,
}

fn setup_logging(args: &Args) -> anyhow::Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    if let Some(log_path) = &args.log {
        let file_name = log_path
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("no file name in {log_path:?}"))?;

        let directory = log_path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("{log_path:?} has no parent"))?;

        let file_appender = tracing_appender::rolling::never(directory, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let subscriber = tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(tracing::Level::DEBUG)
            .with_line_number(true)
            .with_writer(non_blocking)
            .with_ansi(std::io::stdout().is_terminal())
            .finish();

        tracing::subscriber::set_global_default(subscriber)?;

        Ok(Some(guard))
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();

        Ok(None)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = AdocPreview::parse();

    let _guard = setup_logging(&app.args)?;

    if let Err(e) = app.cmd.run(app.args).await {
        eprintln!("error: {e:?}");
        std::process::exit(1);
    }

    Ok(())
}
