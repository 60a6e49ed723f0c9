//! Canonical nested record form of a region tree.
//!
//! One [`RegionRecord`] per region, children nested in tree order. This is
//! the interchange shape written by the JSON export and read back by
//! [`RegionTree::from_record`](crate::RegionTree::from_record):
//!
//! ```text
//! { id, x, y, width, height, content, contentType, backgroundColor, children }
//! ```
//!
//! Absent optionals serialize as `null`; `children` is always present.
//!
//! `id` is an opaque non-empty string. Layouts written by this crate use the
//! `node-<n>` form, but records from other editors may carry any string and
//! load all the same.

use std::fmt;

use serde::{Deserialize, Serialize};
use splitframe_core::geometry::Rect;

use crate::content::ContentType;

/// Serializable region record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRecord {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub content: Option<String>,
    pub content_type: Option<ContentType>,
    pub background_color: Option<String>,
    #[serde(default)]
    pub children: Vec<RegionRecord>,
}

impl RegionRecord {
    /// Geometry of this record.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Number of records in this subtree, self included.
    #[must_use]
    pub fn count(&self) -> usize {
        let mut total = 0;
        let mut stack = vec![self];
        while let Some(record) = stack.pop() {
            total += 1;
            stack.extend(record.children.iter());
        }
        total
    }

    /// Region IDs in pre-order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        let mut stack = vec![self];
        while let Some(record) = stack.pop() {
            ids.push(record.id.as_str());
            stack.extend(record.children.iter().rev());
        }
        ids
    }
}

/// Errors raised when a record cannot become a region tree.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutModelError {
    ZeroRegionId,
    MalformedRegionId { raw: String },
    EmptyRegionId,
    DuplicateRegionId { id: String },
    InvalidGeometry { id: String, rect: Rect },
    PartialContent { id: String },
}

impl fmt::Display for LayoutModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroRegionId => write!(f, "region id 0 is invalid"),
            Self::MalformedRegionId { raw } => {
                write!(f, "malformed region id {raw:?}: expected node-<n>")
            }
            Self::EmptyRegionId => write!(f, "region id must not be empty"),
            Self::DuplicateRegionId { id } => write!(f, "duplicate region id {id}"),
            Self::InvalidGeometry { id, rect } => write!(
                f,
                "region {id} has invalid geometry x={} y={} width={} height={}",
                rect.x, rect.y, rect.width, rect.height
            ),
            Self::PartialContent { id } => write!(
                f,
                "region {id} must carry both content and contentType, or neither"
            ),
        }
    }
}

impl std::error::Error for LayoutModelError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(raw: u64, rect: Rect) -> RegionRecord {
        RegionRecord {
            id: format!("node-{raw}"),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            content: None,
            content_type: None,
            background_color: None,
            children: Vec::new(),
        }
    }

    #[test]
    fn serializes_camel_case_with_nulls() {
        let record = leaf(3, Rect::new(0.0, 90.0, 1440.0, 810.0));
        let value = serde_json::to_value(&record).expect("record serializes");
        assert_eq!(value["id"], "node-3");
        assert_eq!(value["y"], 90.0);
        assert!(value["content"].is_null());
        assert!(value["contentType"].is_null());
        assert!(value["backgroundColor"].is_null());
        assert_eq!(value["children"], serde_json::json!([]));
    }

    #[test]
    fn deserializes_integers_and_missing_children() {
        let json = r##"{
            "id": "node-9", "x": 0, "y": 0, "width": 375, "height": 667,
            "content": "Header", "contentType": "nav", "backgroundColor": "#3a86ff"
        }"##;
        let record: RegionRecord = serde_json::from_str(json).expect("record parses");
        assert_eq!(record.id, "node-9");
        assert_eq!(record.rect(), Rect::from_size(375.0, 667.0));
        assert_eq!(record.content_type, Some(ContentType::Nav));
        assert!(record.children.is_empty());
    }

    #[test]
    fn foreign_ids_are_kept_verbatim() {
        let json = r#"{"id":"node-k3j9x2abc","x":0,"y":0,"width":1,"height":1,
            "content":null,"contentType":null,"backgroundColor":null,"children":[]}"#;
        let record: RegionRecord = serde_json::from_str(json).expect("any string id parses");
        assert_eq!(record.id, "node-k3j9x2abc");
        let value = serde_json::to_value(&record).expect("record serializes");
        assert_eq!(value["id"], "node-k3j9x2abc");
    }

    #[test]
    fn ids_are_pre_order() {
        let mut root = leaf(1, Rect::from_size(10.0, 10.0));
        let mut first = leaf(2, Rect::from_size(10.0, 5.0));
        first.children = vec![
            leaf(4, Rect::from_size(5.0, 5.0)),
            leaf(5, Rect::new(5.0, 0.0, 5.0, 5.0)),
        ];
        root.children = vec![first, leaf(3, Rect::new(0.0, 5.0, 10.0, 5.0))];

        assert_eq!(root.ids(), vec!["node-1", "node-2", "node-4", "node-5", "node-3"]);
        assert_eq!(root.count(), 5);
    }

    #[test]
    fn error_messages_name_the_region() {
        let err = LayoutModelError::PartialContent { id: "node-4".into() };
        assert!(err.to_string().contains("node-4"));
        let err = LayoutModelError::DuplicateRegionId { id: "hero".into() };
        assert!(err.to_string().contains("hero"));
        let err = LayoutModelError::MalformedRegionId { raw: "x".into() };
        assert!(err.to_string().contains("node-<n>"));
    }
}
