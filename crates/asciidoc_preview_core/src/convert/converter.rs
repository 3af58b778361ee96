//! The converter seam and the default `asciidoctor` binding.
//!
//! Conversion semantics are owned entirely by the external converter; this
//! module only marshals a [`ConversionRequest`] into an invocation and reads
//! the wire-shaped response back.

use super::ConversionRequest;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Duration;

/// Error type for conversion operations.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// No response received within the configured interval.
    #[error("conversion timed out after {0:?}")]
    Timeout(Duration),

    /// The conversion worker has shut down.
    #[error("conversion worker is gone")]
    WorkerGone,

    /// No converter executable could be located.
    #[error("asciidoctor executable not found on PATH")]
    ConverterNotFound,

    /// I/O error while invoking the converter.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The converter reported a failure.
    #[error("conversion failed: {0}")]
    Failed(String),
}

/// Raw converter response in wire shape: `html`, `stem`, `messages`
/// (`messages` is absent on success with no diagnostics).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawConversion {
    /// Converted document markup.
    pub html: String,
    /// The document contains math notation requiring a typesetting pass.
    #[serde(default)]
    pub stem: bool,
    /// Converter diagnostics, in emission order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,
}

/// Trait for AsciiDoc converters.
///
/// Implementations run inside the conversion worker and may block; the
/// worker isolates them from the caller.
pub trait Converter: Send + Sync {
    /// Convert a single request into raw markup plus diagnostics.
    fn convert(&self, request: &ConversionRequest) -> Result<RawConversion, ConvertError>;
}

/// Default converter: shells out to the `asciidoctor` executable.
///
/// The request fields map onto CLI flags, the renderer attributes onto `-a`
/// arguments. The converted markup is read from stdout and the diagnostics
/// from stderr.
#[derive(Debug, Clone)]
pub struct AsciidoctorConverter {
    program: PathBuf,
}

impl AsciidoctorConverter {
    /// Locate `asciidoctor` on the PATH.
    pub fn locate() -> Result<Self, ConvertError> {
        let program = which::which("asciidoctor").map_err(|_| ConvertError::ConverterNotFound)?;
        Ok(Self { program })
    }

    /// Use an explicit converter executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, request: &ConversionRequest) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--safe-mode")
            .arg(request.safe_mode.as_str())
            .arg("--doctype")
            .arg(request.doctype.as_str());

        // The base directory travels as a URL-style path; the CLI wants a
        // filesystem path.
        let base_dir = request
            .base_directory
            .strip_prefix("file://")
            .unwrap_or(&request.base_directory);
        if !base_dir.is_empty() {
            cmd.arg("--base-dir").arg(base_dir);
        }

        if !request.include_header_footer {
            cmd.arg("--embedded");
        }

        for (name, value) in &request.attributes {
            if value.is_empty() {
                cmd.arg("-a").arg(name);
            } else {
                cmd.arg("-a").arg(format!("{name}={value}"));
            }
        }

        // Read the document from stdin, write the markup to stdout.
        cmd.arg("-o").arg("-").arg("-");
        cmd.current_dir(&request.working_directory);
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl Converter for AsciidoctorConverter {
    fn convert(&self, request: &ConversionRequest) -> Result<RawConversion, ConvertError> {
        tracing::debug!(program = %self.program.display(), "Invoking converter");

        let mut child = self.command(request).spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            use std::io::Write;
            stdin.write_all(request.source_text.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        let messages: Vec<String> = String::from_utf8_lossy(&output.stderr)
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();

        if !output.status.success() {
            return Err(ConvertError::Failed(messages.join("\n")));
        }

        Ok(RawConversion {
            html: String::from_utf8_lossy(&output.stdout).into_owned(),
            stem: detect_stem(&request.source_text),
            messages,
        })
    }
}

/// Whether the document enables stem (math notation) processing via the
/// `:stem:` header attribute.
fn detect_stem(source_text: &str) -> bool {
    source_text.lines().any(|line| {
        let trimmed = line.trim();
        trimmed == ":stem:" || trimmed.starts_with(":stem: ")
    })
}
