#![forbid(unsafe_code)]

//! Export translators for splitframe layouts.
//!
//! Three read-only walkers over a [`RegionTree`], each invoked on demand:
//!
//! - [`JsonExporter`]: the canonical nested record, pretty-printed.
//! - [`HtmlExporter`]: a standalone document with one embedded stylesheet.
//! - [`JsxExporter`]: a default-exported React function component.
//!
//! All three walk regions in pre-order and address them by the same region
//! IDs: `node-<n>`, or the name a region carried in a loaded record. The HTML and JSX outputs draw their per-type styling from
//! the one table in [`style`].
//!
//! # Usage
//!
//! ```no_run
//! use splitframe_export::{ExportFormat, HtmlExporter, export};
//! use splitframe_layout::RegionTree;
//!
//! let tree = RegionTree::with_canvas(1440.0, 900.0);
//! let html = HtmlExporter::default().export(&tree);
//! let jsx = export(&tree, "react".parse::<ExportFormat>().unwrap()).unwrap();
//! ```

mod escape;
pub mod html;
pub mod json;
pub mod jsx;
pub mod style;

use std::fmt;
use std::str::FromStr;

pub use html::HtmlExporter;
pub use json::JsonExporter;
pub use jsx::JsxExporter;
pub use style::{ComponentStyle, Declaration, StyleRecord, background_color, component_style};

use splitframe_layout::RegionTree;

// ---------------------------------------------------------------------------
// Format selection
// ---------------------------------------------------------------------------

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    Json,
    #[default]
    Html,
    React,
}

impl ExportFormat {
    pub const ALL: [Self; 3] = [Self::Json, Self::Html, Self::React];

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Html => "html",
            Self::React => "react",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "html" => Ok(Self::Html),
            "react" | "jsx" => Ok(Self::React),
            _ => Err(ExportFormatError {
                raw: s.to_string(),
            }),
        }
    }
}

/// Unknown export format name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFormatError {
    pub raw: String,
}

impl fmt::Display for ExportFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown export format {:?} (expected json, html, react or jsx)",
            self.raw
        )
    }
}

impl std::error::Error for ExportFormatError {}

/// Export `tree` with the default configuration of `format`'s translator.
///
/// Only JSON serialization can fail.
pub fn export(tree: &RegionTree, format: ExportFormat) -> Result<String, serde_json::Error> {
    match format {
        ExportFormat::Json => JsonExporter::default().export(tree),
        ExportFormat::Html => Ok(HtmlExporter::default().export(tree)),
        ExportFormat::React => Ok(JsxExporter::default().export(tree)),
    }
}
