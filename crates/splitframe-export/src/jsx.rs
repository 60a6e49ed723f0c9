//! React component source with inline style objects.

use std::fmt::Write;

use splitframe_core::logging::TARGET_EXPORT;
use splitframe_core::{debug_span, trace};
use splitframe_layout::{RegionId, RegionTree};

use crate::escape::{html_escape_into, js_identifier, js_string_escape_into, jsx_text_escape_into};
use crate::style::{StyleRecord, component_style};

const INDENT: &str = "  ";
const DEFAULT_COMPONENT_NAME: &str = "GeneratedLayout";

/// Configuration for React/JSX export.
#[derive(Debug, Clone)]
pub struct JsxExporter {
    /// Name of the default-exported component. Reduced to a valid
    /// JavaScript identifier on export.
    pub component_name: String,
    /// Class of the wrapper element that holds the regions.
    pub container_class: String,
}

impl Default for JsxExporter {
    fn default() -> Self {
        Self {
            component_name: DEFAULT_COMPONENT_NAME.into(),
            container_class: "container".into(),
        }
    }
}

impl JsxExporter {
    /// Export a tree to a single default-exported function component.
    ///
    /// Every region becomes a `<div>` keyed by its region ID, styled by an
    /// inline object: absolute geometry and border first, then the component
    /// table for its content type.
    pub fn export(&self, tree: &RegionTree) -> String {
        let span = debug_span!(
            target: TARGET_EXPORT,
            "export",
            format = "jsx",
            regions = tree.len()
        );
        let _guard = span.enter();
        let name = js_identifier(&self.component_name, DEFAULT_COMPONENT_NAME);
        let mut out = String::with_capacity(256 + tree.len() * 320);

        out.push_str("import React from 'react';\n\n");
        let _ = writeln!(out, "const {name} = () => {{");
        out.push_str("  return (\n");
        out.push_str("    <div className=\"");
        html_escape_into(&mut out, &self.container_class);
        out.push_str("\" style={{ position: 'relative', width: '100%', height: '100vh' }}>\n");
        write_region_element(&mut out, tree, tree.root(), 3);
        out.push_str("    </div>\n");
        out.push_str("  );\n");
        out.push_str("};\n\n");
        let _ = write!(out, "export default {name};");

        trace!(target: TARGET_EXPORT, bytes = out.len(), "exported");
        out
    }
}

fn write_region_element(out: &mut String, tree: &RegionTree, id: RegionId, depth: usize) {
    let Some(region) = tree.node(id) else {
        return;
    };
    let indent = INDENT.repeat(depth);
    let component = region.content_type().and_then(component_style);

    let mut style = StyleRecord::for_region(region);
    if let Some(component) = component {
        style.apply(component);
    }

    let mut name = String::new();
    html_escape_into(&mut name, &region.external_id());
    let _ = write!(out, "{indent}<div key=\"{name}\" id=\"{name}\" style={{{{ ");
    for (index, (key, value)) in style.js_entries().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{key}: '");
        js_string_escape_into(out, value);
        out.push('\'');
    }
    out.push_str(" }}");
    if let Some(kind) = region.content_type() {
        out.push_str(" className=\"");
        html_escape_into(out, kind.as_str());
        out.push('"');
    }
    out.push_str(">\n");

    if region.is_leaf() {
        let text = region
            .text()
            .filter(|text| !text.is_empty())
            .or_else(|| component.and_then(|component| component.label));
        if let Some(text) = text {
            out.push_str(&indent);
            out.push_str(INDENT);
            jsx_text_escape_into(out, text);
            out.push('\n');
        }
    }
    for child in region.children() {
        write_region_element(out, tree, *child, depth + 1);
    }

    let _ = writeln!(out, "{indent}</div>");
}
