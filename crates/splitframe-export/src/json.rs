//! Canonical record as JSON.

use splitframe_core::logging::TARGET_EXPORT;
use splitframe_core::{debug_span, trace};
use splitframe_layout::{RegionRecord, RegionTree};

/// Configuration for JSON export.
#[derive(Debug, Clone)]
pub struct JsonExporter {
    /// Pretty-print with two-space indentation (true) or emit one line.
    pub pretty: bool,
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl JsonExporter {
    /// Export the tree's canonical record.
    pub fn export(&self, tree: &RegionTree) -> Result<String, serde_json::Error> {
        let span = debug_span!(
            target: TARGET_EXPORT,
            "export",
            format = "json",
            regions = tree.len()
        );
        let _guard = span.enter();
        let record = tree.serialize();
        let out = if self.pretty {
            serde_json::to_string_pretty(&record)?
        } else {
            serde_json::to_string(&record)?
        };
        trace!(target: TARGET_EXPORT, bytes = out.len(), "exported");
        Ok(out)
    }

    /// Parse a canonical record previously written by [`JsonExporter::export`].
    pub fn parse(&self, json: &str) -> Result<RegionRecord, serde_json::Error> {
        serde_json::from_str(json)
    }
}
