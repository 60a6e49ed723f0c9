//! Standalone HTML document with an embedded stylesheet.

use std::fmt::Write;

use splitframe_core::logging::TARGET_EXPORT;
use splitframe_core::{debug_span, trace};
use splitframe_layout::{Region, RegionId, RegionTree};

use crate::escape::{css_escape_ident_into, html_escape_into};
use crate::style::{LABEL_COLOR, REGION_BORDER, background_color, component_style, px};

const INDENT: &str = "    ";

/// Configuration for HTML export.
#[derive(Debug, Clone)]
pub struct HtmlExporter {
    /// Document `<title>`.
    pub title: String,
    /// Class of the wrapper element that holds the regions.
    pub container_class: String,
}

impl Default for HtmlExporter {
    fn default() -> Self {
        Self {
            title: "Generated Layout".into(),
            container_class: "container".into(),
        }
    }
}

impl HtmlExporter {
    /// Export a tree to a complete HTML document.
    ///
    /// The stylesheet has one base rule per region (absolute geometry,
    /// border, background) followed by the component rule for its content
    /// type. Markup nests one `<div>` per region, addressed by region ID.
    /// Selectors are CSS-escaped and attribute values HTML-escaped, so
    /// loaded IDs and configured class names cannot break out of either.
    pub fn export(&self, tree: &RegionTree) -> String {
        let nodes = tree.all_nodes();
        let span = debug_span!(
            target: TARGET_EXPORT,
            "export",
            format = "html",
            regions = nodes.len()
        );
        let _guard = span.enter();
        let mut out = String::with_capacity(512 + nodes.len() * 256);

        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        out.push_str("    <meta charset=\"UTF-8\">\n");
        out.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        out.push_str("    <title>");
        html_escape_into(&mut out, &self.title);
        out.push_str("</title>\n    <style>\n");

        out.push_str("* { box-sizing: border-box; margin: 0; padding: 0; }\n");
        out.push_str("body { font-family: sans-serif; }\n");
        out.push('.');
        css_escape_ident_into(&mut out, &self.container_class);
        out.push_str(" { width: 100%; height: 100vh; position: relative; }\n");
        for region in &nodes {
            write_region_rules(&mut out, tree, region);
        }

        out.push_str("    </style>\n</head>\n<body>\n");
        out.push_str("    <div class=\"");
        html_escape_into(&mut out, &self.container_class);
        out.push_str("\">\n");
        write_region_markup(&mut out, tree, tree.root(), 2);
        out.push_str("    </div>\n</body>\n</html>");

        trace!(target: TARGET_EXPORT, bytes = out.len(), "exported");
        out
    }
}

fn write_region_rules(out: &mut String, tree: &RegionTree, region: &Region) {
    let mut selector = String::from("#");
    css_escape_ident_into(&mut selector, &region.external_id());
    let rect = region.rect();
    let _ = write!(
        out,
        "{selector} {{ position: absolute; left: {}; top: {}; width: {}; height: {}; border: {REGION_BORDER};",
        px(rect.x),
        px(rect.y),
        px(rect.width),
        px(rect.height),
    );
    if let Some(color) = background_color(region) {
        let _ = write!(out, " background-color: {color};");
    }
    out.push_str(" }\n");

    if let Some(style) = region.content_type().and_then(component_style) {
        let _ = write!(out, "{selector} {{");
        for declaration in style.declarations {
            let _ = write!(out, " {}: {};", declaration.css, declaration.value);
        }
        out.push_str(" }\n");
        if let Some(label) = style.label {
            let _ = writeln!(
                out,
                "{selector}::after {{ content: '{label}'; color: {LABEL_COLOR}; }}"
            );
        }
    }

    // Highlight regions below the root's direct children on hover.
    if region.parent().is_some_and(|parent| parent != tree.root()) {
        let _ = writeln!(
            out,
            "{selector}:hover {{ border-color: {LABEL_COLOR}; z-index: 1; }}"
        );
    }
}

fn write_region_markup(out: &mut String, tree: &RegionTree, id: RegionId, depth: usize) {
    let Some(region) = tree.node(id) else {
        return;
    };
    let indent = INDENT.repeat(depth);

    out.push_str(&indent);
    out.push_str("<div id=\"");
    html_escape_into(out, &region.external_id());
    out.push('"');
    if let Some(kind) = region.content_type() {
        out.push_str(" class=\"");
        html_escape_into(out, kind.as_str());
        out.push('"');
    }
    out.push_str(">\n");

    if region.is_leaf()
        && let Some(text) = region.text().filter(|text| !text.is_empty())
    {
        out.push_str(&indent);
        out.push_str(INDENT);
        html_escape_into(out, text);
        out.push('\n');
    }
    for child in region.children() {
        write_region_markup(out, tree, *child, depth + 1);
    }

    let _ = writeln!(out, "{indent}</div>");
}
