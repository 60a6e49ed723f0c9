#![forbid(unsafe_code)]

//! Core: canvas geometry and the logging facade shared by every splitframe crate.

pub mod geometry;
pub mod logging;

pub use geometry::{Rect, SplitAxis};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace};
