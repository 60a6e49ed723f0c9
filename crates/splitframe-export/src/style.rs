//! Component style table shared by the HTML and JSX translators.
//!
//! Each known [`ContentType`] maps to a list of declarations. A declaration
//! carries both spellings of its property (`border-radius` for stylesheets,
//! `borderRadius` for inline style objects) so the two translators cannot
//! drift apart.

use splitframe_core::debug;
use splitframe_core::logging::TARGET_EXPORT;
use splitframe_layout::{ContentType, Region};

use crate::escape::is_safe_css_value;

/// Border drawn on every exported region as a visual aid.
pub const REGION_BORDER: &str = "1px solid #ced4da";

/// One style declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration {
    /// Stylesheet property name.
    pub css: &'static str,
    /// Inline style object key.
    pub js: &'static str,
    pub value: &'static str,
}

const fn decl(css: &'static str, js: &'static str, value: &'static str) -> Declaration {
    Declaration { css, js, value }
}

/// Extra styling for one content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentStyle {
    pub declarations: &'static [Declaration],
    /// Decorative text shown when the region has nothing else to display.
    pub label: Option<&'static str>,
}

const TEXT: ComponentStyle = ComponentStyle {
    declarations: &[decl("padding", "padding", "8px")],
    label: None,
};

const NAV: ComponentStyle = ComponentStyle {
    declarations: &[
        decl("background-color", "backgroundColor", "#212529"),
        decl("color", "color", "white"),
        decl("display", "display", "flex"),
        decl("align-items", "alignItems", "center"),
        decl("padding", "padding", "8px"),
        decl("border-bottom", "borderBottom", "2px solid #495057"),
    ],
    label: None,
};

const BUTTON: ComponentStyle = ComponentStyle {
    declarations: &[
        decl("display", "display", "flex"),
        decl("align-items", "alignItems", "center"),
        decl("justify-content", "justifyContent", "center"),
        decl("background-color", "backgroundColor", "#3a86ff"),
        decl("color", "color", "white"),
        decl("border-radius", "borderRadius", "4px"),
    ],
    label: None,
};

const INPUT: ComponentStyle = ComponentStyle {
    declarations: &[
        decl("border", "border", "2px solid #dee2e6"),
        decl("border-radius", "borderRadius", "4px"),
        decl("padding", "padding", "8px"),
    ],
    label: None,
};

const CARD: ComponentStyle = ComponentStyle {
    declarations: &[
        decl("background-color", "backgroundColor", "white"),
        decl("border", "border", "1px solid #dee2e6"),
        decl("border-radius", "borderRadius", "4px"),
        decl("box-shadow", "boxShadow", "0 2px 4px rgba(0,0,0,0.1)"),
        decl("padding", "padding", "16px"),
    ],
    label: None,
};

const IMAGE: ComponentStyle = ComponentStyle {
    declarations: &[
        decl("background-color", "backgroundColor", "#e9ecef"),
        decl("display", "display", "flex"),
        decl("align-items", "alignItems", "center"),
        decl("justify-content", "justifyContent", "center"),
    ],
    label: Some("Image"),
};

/// Color of the decorative label.
pub const LABEL_COLOR: &str = "#6c757d";

/// Look up the extra styling for a content type. Unknown types get none.
#[must_use]
pub fn component_style(kind: &ContentType) -> Option<&'static ComponentStyle> {
    match kind {
        ContentType::Text => Some(&TEXT),
        ContentType::Nav => Some(&NAV),
        ContentType::Button => Some(&BUTTON),
        ContentType::Input => Some(&INPUT),
        ContentType::Card => Some(&CARD),
        ContentType::Image => Some(&IMAGE),
        ContentType::Other(_) => None,
    }
}

/// Format a canvas coordinate as a CSS pixel length.
///
/// Uses the shortest representation that round-trips, so whole numbers have
/// no fractional part (`90px`, `364.5px`).
#[must_use]
pub fn px(value: f64) -> String {
    format!("{value}px")
}

/// The region's background color, when it is a plain CSS value.
///
/// Values that could end the declaration or the surrounding rule are logged
/// and left out of every export.
#[must_use]
pub fn background_color(region: &Region) -> Option<&str> {
    let color = region.background_color()?;
    if is_safe_css_value(color) {
        return Some(color);
    }
    debug!(
        target: TARGET_EXPORT,
        region = %region.id(),
        color,
        "background color dropped: not a plain CSS value"
    );
    None
}

/// Ordered inline style record.
///
/// Setting a property that is already present replaces its value in place,
/// so later layers override earlier ones without reordering keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleRecord {
    entries: Vec<(&'static str, &'static str, String)>,
}

impl StyleRecord {
    /// Seed with absolute geometry, the region border and the background.
    #[must_use]
    pub fn for_region(region: &Region) -> Self {
        let rect = region.rect();
        let mut record = Self::default();
        record.set("position", "position", "absolute");
        record.set("left", "left", px(rect.x));
        record.set("top", "top", px(rect.y));
        record.set("width", "width", px(rect.width));
        record.set("height", "height", px(rect.height));
        record.set("border", "border", REGION_BORDER);
        if let Some(color) = background_color(region) {
            record.set("background-color", "backgroundColor", color);
        }
        record
    }

    /// Set a property, replacing any previous value.
    pub fn set(&mut self, css: &'static str, js: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _, _)| *key == css) {
            Some(entry) => entry.2 = value,
            None => self.entries.push((css, js, value)),
        }
    }

    /// Overlay every declaration of `style`.
    pub fn apply(&mut self, style: &ComponentStyle) {
        for declaration in style.declarations {
            self.set(declaration.css, declaration.js, declaration.value);
        }
    }

    /// Value of a stylesheet property.
    #[must_use]
    pub fn get(&self, css: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _, _)| *key == css)
            .map(|(_, _, value)| value.as_str())
    }

    /// `(js key, value)` pairs in insertion order.
    pub fn js_entries(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(_, js, value)| (*js, value.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
