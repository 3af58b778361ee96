//! Core library for AsciiDoc preview functionality.
//!
//! This crate implements the preview-rendering pipeline: the path from raw
//! document text plus preferences to a finished HTML page. Conversion runs
//! off the caller's task in a long-lived worker owned by
//! [`ConversionService`]; page assembly is synchronous string building.
//!
//! # Modules
//!
//! - [`frontmatter`] - Leading front-matter removal
//! - [`preferences`] - Render preferences read by the pipeline
//! - [`assets`] - Styling/script asset URL resolution
//! - [`convert`] - Conversion dispatch, worker, and output fixups
//! - [`assemble`] - Page assembly from converted HTML
//! - [`export`] - Export-to-browser side effect

pub mod assemble;
pub mod assets;
pub mod convert;
pub mod export;
pub mod frontmatter;
pub mod preferences;

// Re-export commonly used types at crate root
pub use assemble::{assemble_page, RenderedPage};
pub use assets::AssetRoot;
pub use convert::{
    build_request, AsciidoctorConverter, ConversionRequest, ConversionResult, ConversionService,
    ConvertError, Converter, RawConversion,
};
pub use export::{export_to_browser, ExportError};
pub use frontmatter::strip_front_matter;
pub use preferences::{load_preferences, Doctype, RenderPreferences, SafeMode};
