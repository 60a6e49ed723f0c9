#![forbid(unsafe_code)]

//! Binary space-partition region tree.
//!
//! A layout is a tree of rectangular regions. Every region is either a leaf,
//! which may carry [`Content`] and a background color, or an internal node
//! whose children partition its rectangle. All rectangles share the canvas
//! coordinate space.
//!
//! - [`RegionTree`] - the arena: split, grid, hit-test, remove, rescale
//! - [`RegionId`] / [`IdProvider`] - stable `node-<n>` identifiers
//! - [`RegionRecord`] - the canonical nested serialization
//!
//! ```ignore
//! use splitframe_layout::RegionTree;
//!
//! let mut tree = RegionTree::with_canvas(1440.0, 900.0);
//! let (header, body) = tree.split_horizontal(tree.root(), 0.1).unwrap();
//! tree.set_content(header, "Header", "nav");
//! let cells = tree.create_grid(body, 2, 3).unwrap();
//! assert_eq!(cells.len(), 6);
//! ```

pub mod content;
pub mod ids;
pub mod record;
pub mod tree;

pub use content::{Content, ContentType};
pub use ids::{IdProvider, ProcessIds, REGION_ID_PREFIX, RegionId, SequentialIds};
pub use record::{LayoutModelError, RegionRecord};
pub use splitframe_core::geometry::{Rect, SplitAxis};
pub use tree::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, Region, RegionTree};
