//! Leaf content: the text a region displays and the UI role it plays.

use std::fmt;

use serde::{Deserialize, Serialize};

/// UI role of a leaf region.
///
/// An open set: the known roles drive export styling, anything else is kept
/// verbatim and exported without extra rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentType {
    #[default]
    Text,
    Nav,
    Button,
    Input,
    Card,
    Image,
    Other(String),
}

impl ContentType {
    /// Every role with dedicated export styling.
    pub const KNOWN: [Self; 6] = [
        Self::Text,
        Self::Nav,
        Self::Button,
        Self::Input,
        Self::Card,
        Self::Image,
    ];

    /// Tag as written in records, class names and tool names.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Nav => "nav",
            Self::Button => "button",
            Self::Input => "input",
            Self::Card => "card",
            Self::Image => "image",
            Self::Other(tag) => tag,
        }
    }

    /// Tag with its first character upper-cased (`button` -> `Button`).
    ///
    /// Used as placeholder text when a component tool drops this role onto a
    /// region.
    #[must_use]
    pub fn label(&self) -> String {
        let tag = self.as_str();
        let mut chars = tag.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Whether this role has dedicated export styling.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for ContentType {
    fn from(tag: &str) -> Self {
        match tag {
            "text" => Self::Text,
            "nav" => Self::Nav,
            "button" => Self::Button,
            "input" => Self::Input,
            "card" => Self::Card,
            "image" => Self::Image,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ContentType {
    fn from(tag: String) -> Self {
        match Self::from(tag.as_str()) {
            Self::Other(_) => Self::Other(tag),
            known => known,
        }
    }
}

impl From<ContentType> for String {
    fn from(kind: ContentType) -> Self {
        match kind {
            ContentType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text plus role assigned to a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Content {
    pub text: String,
    pub kind: ContentType,
}

impl Content {
    /// Build content with an explicit role.
    #[must_use]
    pub fn new(text: impl Into<String>, kind: impl Into<ContentType>) -> Self {
        Self {
            text: text.into(),
            kind: kind.into(),
        }
    }

    /// Build plain `text` content.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(text, ContentType::Text)
    }
}
