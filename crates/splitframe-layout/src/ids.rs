//! Region identifiers and the providers that mint them.
//!
//! A [`RegionId`] is allocated once when a region is created and never
//! handed out again, even after that region is removed. Externally it is
//! rendered as `node-<n>`, which doubles as an HTML id and a React key.
//!
//! Trees mint from [`ProcessIds`] unless told otherwise, so two documents
//! alive in the same process never share an ID.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::record::LayoutModelError;

/// Prefix of the external identifier form.
pub const REGION_ID_PREFIX: &str = "node-";

/// Stable identifier for a region.
///
/// `0` is reserved/invalid so IDs are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegionId(u64);

impl RegionId {
    /// Lowest valid region ID.
    pub const MIN: Self = Self(1);

    /// Create a region ID, rejecting 0.
    pub fn new(raw: u64) -> Result<Self, LayoutModelError> {
        if raw == 0 {
            return Err(LayoutModelError::ZeroRegionId);
        }
        Ok(Self(raw))
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{REGION_ID_PREFIX}{}", self.0)
    }
}

impl FromStr for RegionId {
    type Err = LayoutModelError;

    /// Parse the canonical `node-<n>` form only.
    ///
    /// Leading zeros are rejected so that a parsed ID always displays as the
    /// exact string it was read from.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || LayoutModelError::MalformedRegionId { raw: s.to_string() };
        let digits = s.strip_prefix(REGION_ID_PREFIX).ok_or_else(malformed)?;
        if digits.is_empty()
            || digits.starts_with('0')
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(malformed());
        }
        let raw = digits.parse::<u64>().map_err(|_| malformed())?;
        Self::new(raw)
    }
}

impl TryFrom<String> for RegionId {
    type Error = LayoutModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RegionId> for String {
    fn from(id: RegionId) -> Self {
        id.to_string()
    }
}

/// Source of fresh region identifiers.
///
/// Implementations must never return the same ID twice and must never
/// return an ID at or below one passed to [`IdProvider::reserve_past`].
pub trait IdProvider: fmt::Debug + Send {
    /// Mint the next identifier.
    fn allocate(&mut self) -> RegionId;

    /// Guarantee that every later allocation is greater than `id`.
    ///
    /// Called after a tree is rebuilt from a record so loaded IDs are not
    /// minted again.
    fn reserve_past(&mut self, id: RegionId);
}

/// Per-tree monotonic counter.
///
/// Numbers each tree from `node-1` independently of every other tree, which
/// keeps exports reproducible. IDs are only unique within one tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    /// Start allocating from a known raw value (0 is bumped to 1).
    #[must_use]
    pub const fn starting_at(next: u64) -> Self {
        Self {
            next: if next == 0 { 1 } else { next },
        }
    }

    /// Peek at the next ID without consuming it.
    #[must_use]
    pub const fn peek(&self) -> RegionId {
        RegionId(self.next)
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::starting_at(RegionId::MIN.0)
    }
}

impl IdProvider for SequentialIds {
    fn allocate(&mut self) -> RegionId {
        let current = RegionId(self.next);
        // u64 exhaustion is unreachable at editing speeds.
        self.next = self.next.saturating_add(1);
        current
    }

    fn reserve_past(&mut self, id: RegionId) {
        self.next = self.next.max(id.0.saturating_add(1));
    }
}

static PROCESS_NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-wide counter shared by every tree that uses it. The default
/// provider.
///
/// IDs from this provider are unique across all documents in the process,
/// including trees built after a reset, which lets a presentation layer key
/// a single lookup table by ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessIds;

impl IdProvider for ProcessIds {
    fn allocate(&mut self) -> RegionId {
        RegionId(PROCESS_NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    fn reserve_past(&mut self, id: RegionId) {
        PROCESS_NEXT_ID.fetch_max(id.0.saturating_add(1), Ordering::Relaxed);
    }
}
