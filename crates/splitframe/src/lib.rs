#![forbid(unsafe_code)]

//! splitframe public facade crate.
//!
//! Re-exports the region tree and the export translators, and adds the
//! [`Document`] editing session that a presentation layer or command surface
//! drives.

use std::fmt;

pub mod document;

pub use document::{Document, DocumentChange, ObserverId, StarterLayout, build_starter_layout};

// --- Layout re-exports -----------------------------------------------------

pub use splitframe_layout::{
    Content, ContentType, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, IdProvider,
    LayoutModelError, ProcessIds, Rect, Region, RegionId, RegionRecord, RegionTree,
    SequentialIds, SplitAxis,
};

// --- Export re-exports -----------------------------------------------------

pub use splitframe_export::{
    ExportFormat, ExportFormatError, HtmlExporter, JsonExporter, JsxExporter, export,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for splitframe.
#[derive(Debug)]
pub enum Error {
    /// A record could not be turned into a region tree.
    Model(LayoutModelError),
    /// Unknown export format name.
    Format(ExportFormatError),
    /// JSON encoding or decoding failed.
    Json(serde_json::Error),
    /// I/O failure reading or writing a layout.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Model(err) => write!(f, "invalid layout: {err}"),
            Self::Format(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "json: {err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Model(err) => Some(err),
            Self::Format(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<LayoutModelError> for Error {
    fn from(err: LayoutModelError) -> Self {
        Self::Model(err)
    }
}

impl From<ExportFormatError> for Error {
    fn from(err: ExportFormatError) -> Self {
        Self::Format(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Standard result type for splitframe APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ContentType, Document, DocumentChange, Error, ExportFormat, Rect, Region, RegionId,
        RegionTree, Result, SplitAxis,
    };

    pub use crate::{core, exporters, layout};
}

pub use splitframe_core as core;
pub use splitframe_export as exporters;
pub use splitframe_layout as layout;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_convert_and_describe_themselves() {
        let err: Error = LayoutModelError::ZeroRegionId.into();
        assert!(matches!(err, Error::Model(_)));
        assert!(err.to_string().starts_with("invalid layout:"));

        let err: Error = "svg".parse::<ExportFormat>().expect_err("unknown").into();
        assert!(err.to_string().contains("svg"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
