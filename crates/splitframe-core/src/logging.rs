#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature the `tracing` macros the workspace uses
//! (`debug!`, `trace!` and `debug_span!`) are re-exported here and at the
//! crate root. Without it, same-named macros expand to nothing so
//! library crates can log unconditionally and pay nothing in lean builds.
//!
//! Library code logs against the targets below so a subscriber can filter
//! tree mutations and exports independently:
//!
//! ```sh
//! SPLITFRAME_LOG=splitframe::tree=trace,splitframe::export=debug splitframe
//! ```

/// Target for partition-tree mutations and ignored operations.
pub const TARGET_TREE: &str = "splitframe::tree";

/// Target for export translators.
pub const TARGET_EXPORT: &str = "splitframe::export";

/// Target for document sessions and observer dispatch.
pub const TARGET_DOCUMENT: &str = "splitframe::document";

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, trace};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// Expands to nothing when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Expands to nothing when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// Yields an inert span when tracing is disabled.
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }
}

/// Span stand-in used when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Enter the span. The guard does nothing.
    pub fn enter(&self) -> NoopGuard {
        NoopGuard
    }
}

/// Guard returned by [`NoopSpan::enter`].
#[cfg(not(feature = "tracing"))]
#[derive(Debug)]
pub struct NoopGuard;
