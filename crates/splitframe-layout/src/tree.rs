//! The partition tree.
//!
//! Regions live in an arena keyed by [`RegionId`]. A region owns its children
//! by ID and keeps a non-owning back-reference to its parent, so upward walks
//! (removal, ancestor checks) never create ownership cycles.
//!
//! Structural operations follow one rule: they only act on leaves. Calling a
//! split or grid on a region that already has children is a silent no-op,
//! observable only through the `None` return value and a debug log line.
//!
//! Records from other editors may name regions with arbitrary strings. Such a
//! region gets a freshly minted [`RegionId`] and remembers its original
//! string, which exports and serialization write back unchanged.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};

use splitframe_core::geometry::{Rect, SplitAxis, approx_eq};
use splitframe_core::logging::TARGET_TREE;
use splitframe_core::{debug, debug_span, trace};

use crate::content::{Content, ContentType};
use crate::ids::{IdProvider, ProcessIds, RegionId, SequentialIds};
use crate::record::{LayoutModelError, RegionRecord};

/// Default canvas width (desktop).
pub const DEFAULT_CANVAS_WIDTH: f64 = 1440.0;

/// Default canvas height (desktop).
pub const DEFAULT_CANVAS_HEIGHT: f64 = 900.0;

/// One node of the partition tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    id: RegionId,
    /// Loaded ID string that is not in `node-<n>` form.
    external: Option<String>,
    rect: Rect,
    content: Option<Content>,
    background_color: Option<String>,
    parent: Option<RegionId>,
    children: Vec<RegionId>,
}

impl Region {
    fn new(id: RegionId, rect: Rect, parent: Option<RegionId>) -> Self {
        Self {
            id,
            external: None,
            rect,
            content: None,
            background_color: None,
            parent,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> RegionId {
        self.id
    }

    /// ID written to exports and records.
    ///
    /// The string a foreign record named this region with, otherwise the
    /// `node-<n>` form of [`Region::id`].
    #[must_use]
    pub fn external_id(&self) -> Cow<'_, str> {
        match &self.external {
            Some(external) => Cow::Borrowed(external),
            None => Cow::Owned(self.id.to_string()),
        }
    }

    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    #[must_use]
    pub const fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    /// Displayed text, when the region carries content.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.content.as_ref().map(|content| content.text.as_str())
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&ContentType> {
        self.content.as_ref().map(|content| &content.kind)
    }

    #[must_use]
    pub fn background_color(&self) -> Option<&str> {
        self.background_color.as_deref()
    }

    #[must_use]
    pub const fn parent(&self) -> Option<RegionId> {
        self.parent
    }

    /// Child IDs in tree order.
    #[must_use]
    pub fn children(&self) -> &[RegionId] {
        &self.children
    }

    #[must_use]
    pub fn is_split(&self) -> bool {
        !self.children.is_empty()
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena-backed binary space-partition tree.
#[derive(Debug)]
pub struct RegionTree {
    root: RegionId,
    nodes: BTreeMap<RegionId, Region>,
    ids: Box<dyn IdProvider>,
}

impl Default for RegionTree {
    fn default() -> Self {
        Self::with_canvas(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}

impl RegionTree {
    /// Build a tree whose root leaf covers `rect`.
    ///
    /// IDs come from [`ProcessIds`], so they never collide with those of any
    /// other tree in the process.
    #[must_use]
    pub fn new(rect: Rect) -> Self {
        Self::with_id_provider(rect, Box::new(ProcessIds))
    }

    /// Build a tree whose root leaf covers a `width` x `height` canvas.
    #[must_use]
    pub fn with_canvas(width: f64, height: f64) -> Self {
        Self::new(Rect::from_size(width, height))
    }

    /// Build a tree numbered from `node-1` by its own counter.
    ///
    /// Exports of such a tree are reproducible, but its IDs may repeat those
    /// of other trees.
    #[must_use]
    pub fn with_sequential_ids(width: f64, height: f64) -> Self {
        Self::with_id_provider(
            Rect::from_size(width, height),
            Box::new(SequentialIds::default()),
        )
    }

    /// Build a tree that mints IDs from `ids`.
    #[must_use]
    pub fn with_id_provider(rect: Rect, mut ids: Box<dyn IdProvider>) -> Self {
        let root = ids.allocate();
        let mut nodes = BTreeMap::new();
        let _ = nodes.insert(root, Region::new(root, rect, None));
        Self { root, nodes, ids }
    }

    /// Rebuild a tree from its canonical record, minting later IDs from
    /// [`ProcessIds`].
    pub fn from_record(record: &RegionRecord) -> Result<Self, LayoutModelError> {
        Self::from_record_with_id_provider(record, Box::new(ProcessIds))
    }

    /// Rebuild a tree from its canonical record, minting later IDs from `ids`.
    ///
    /// Records named `node-<n>` keep that ID and `ids` is advanced past the
    /// largest of them. Any other non-empty name is kept as the region's
    /// [`external_id`](Region::external_id) and backed by a fresh ID. Content
    /// found on a record that has children is dropped, since only leaves
    /// carry content.
    pub fn from_record_with_id_provider(
        record: &RegionRecord,
        mut ids: Box<dyn IdProvider>,
    ) -> Result<Self, LayoutModelError> {
        let span = debug_span!(target: TARGET_TREE, "load_record", regions = record.count());
        let _guard = span.enter();

        // Validate everything and reserve loaded IDs before minting any.
        let mut seen: HashSet<&str> = HashSet::new();
        let mut max_loaded: Option<RegionId> = None;
        let mut pending = vec![record];
        while let Some(current) = pending.pop() {
            if current.id.is_empty() {
                return Err(LayoutModelError::EmptyRegionId);
            }
            if !seen.insert(current.id.as_str()) {
                return Err(LayoutModelError::DuplicateRegionId {
                    id: current.id.clone(),
                });
            }
            let rect = current.rect();
            if !rect.is_well_formed() {
                return Err(LayoutModelError::InvalidGeometry {
                    id: current.id.clone(),
                    rect,
                });
            }
            if current.content.is_some() != current.content_type.is_some() {
                return Err(LayoutModelError::PartialContent {
                    id: current.id.clone(),
                });
            }
            if let Ok(id) = current.id.parse::<RegionId>() {
                max_loaded = max_loaded.max(Some(id));
            }
            pending.extend(current.children.iter());
        }
        if let Some(max) = max_loaded {
            ids.reserve_past(max);
        }

        let mut resolve = |record: &RegionRecord| match record.id.parse::<RegionId>() {
            Ok(id) => (id, None),
            Err(_) => (ids.allocate(), Some(record.id.clone())),
        };

        let (root, root_external) = resolve(record);
        let mut nodes = BTreeMap::new();
        let mut stack: Vec<(&RegionRecord, RegionId, Option<String>, Option<RegionId>)> =
            vec![(record, root, root_external, None)];

        while let Some((current, id, external, parent)) = stack.pop() {
            let children: Vec<_> = current
                .children
                .iter()
                .map(|child| {
                    let (child_id, child_external) = resolve(child);
                    (child, child_id, child_external, Some(id))
                })
                .collect();

            let mut region = Region::new(id, current.rect(), parent);
            region.external = external;
            region.background_color.clone_from(&current.background_color);
            region.children = children.iter().map(|(_, child_id, _, _)| *child_id).collect();

            if let (Some(text), Some(kind)) = (&current.content, &current.content_type) {
                if region.is_leaf() {
                    region.content = Some(Content::new(text.clone(), kind.clone()));
                } else {
                    debug!(
                        target: TARGET_TREE,
                        region = %current.id,
                        "dropping content recorded on a split region"
                    );
                }
            }

            let _ = nodes.insert(id, region);
            stack.extend(children.into_iter().rev());
        }
        trace!(target: TARGET_TREE, regions = nodes.len(), "tree rebuilt from record");

        Ok(Self { root, nodes, ids })
    }

    // --- Queries ------------------------------------------------------------

    /// Root region ID.
    #[must_use]
    pub const fn root(&self) -> RegionId {
        self.root
    }

    /// Root region.
    #[must_use]
    pub fn root_region(&self) -> &Region {
        // The root is never removed from the arena.
        &self.nodes[&self.root]
    }

    /// Canvas rectangle (the root's geometry).
    #[must_use]
    pub fn canvas(&self) -> Rect {
        self.root_region().rect
    }

    /// Lookup a region by ID.
    #[must_use]
    pub fn node(&self, id: RegionId) -> Option<&Region> {
        self.nodes.get(&id)
    }

    /// Live region named `external` in exports and records.
    ///
    /// Accepts both the `node-<n>` form and foreign names kept from a loaded
    /// record.
    #[must_use]
    pub fn resolve(&self, external: &str) -> Option<RegionId> {
        match external.parse::<RegionId>() {
            Ok(id) => self
                .nodes
                .get(&id)
                .filter(|region| region.external.is_none())
                .map(Region::id),
            Err(_) => self
                .nodes
                .values()
                .find(|region| region.external.as_deref() == Some(external))
                .map(Region::id),
        }
    }

    /// Whether `id` names a live region of this tree.
    #[must_use]
    pub fn contains(&self, id: RegionId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of live regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its root, so it is never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` has children. Unknown IDs are not split.
    #[must_use]
    pub fn is_split(&self, id: RegionId) -> bool {
        self.nodes.get(&id).is_some_and(Region::is_split)
    }

    /// Parent of `id`, `None` for the root or unknown IDs.
    #[must_use]
    pub fn parent(&self, id: RegionId) -> Option<RegionId> {
        self.nodes.get(&id).and_then(Region::parent)
    }

    /// Children of `id` in tree order.
    #[must_use]
    pub fn children(&self, id: RegionId) -> &[RegionId] {
        self.nodes.get(&id).map_or(&[], Region::children)
    }

    /// Number of edges between `id` and the root.
    #[must_use]
    pub fn depth(&self, id: RegionId) -> Option<usize> {
        let mut current = self.nodes.get(&id)?;
        let mut depth = 0;
        while let Some(parent) = current.parent {
            current = self.nodes.get(&parent)?;
            depth += 1;
        }
        Some(depth)
    }

    /// Whether `ancestor` lies strictly above `descendant`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: RegionId, descendant: RegionId) -> bool {
        let mut cursor = self.parent(descendant);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.parent(id);
        }
        false
    }

    /// Every region, pre-order (self, then each child's subtree in order).
    #[must_use]
    pub fn all_nodes(&self) -> Vec<&Region> {
        self.subtree_nodes(self.root)
    }

    /// Every region under and including `id`, pre-order.
    ///
    /// Empty when `id` is unknown.
    #[must_use]
    pub fn subtree_nodes(&self, id: RegionId) -> Vec<&Region> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(region) = self.nodes.get(&current) else {
                continue;
            };
            out.push(region);
            stack.extend(region.children.iter().rev().copied());
        }
        out
    }

    /// Leaves of the whole tree, pre-order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&Region> {
        self.subtree_leaves(self.root)
    }

    /// Leaves under and including `id`, pre-order.
    #[must_use]
    pub fn subtree_leaves(&self, id: RegionId) -> Vec<&Region> {
        self.subtree_nodes(id)
            .into_iter()
            .filter(|region| region.is_leaf())
            .collect()
    }

    /// Deepest region whose rectangle contains the point.
    ///
    /// Edges are inclusive. Children are preferred over their parent, and the
    /// first matching child wins when rectangles touch or overlap. Returns
    /// `None` for points outside the root.
    #[must_use]
    pub fn find_node_at(&self, x: f64, y: f64) -> Option<&Region> {
        let root = self.nodes.get(&self.root)?;
        if !root.rect.contains(x, y) {
            return None;
        }

        let mut current = root;
        'descend: loop {
            for child_id in &current.children {
                if let Some(child) = self.nodes.get(child_id)
                    && child.rect.contains(x, y)
                {
                    current = child;
                    continue 'descend;
                }
            }
            return Some(current);
        }
    }

    /// Whether the children of `id` exactly cover its rectangle without
    /// overlapping each other.
    ///
    /// Leaves are trivially tiled. A region whose sibling was removed is not:
    /// removal never re-tiles the survivor.
    #[must_use]
    pub fn is_tiled(&self, id: RegionId) -> bool {
        let Some(region) = self.nodes.get(&id) else {
            return false;
        };
        if region.is_leaf() {
            return true;
        }

        let rects: Vec<Rect> = region
            .children
            .iter()
            .filter_map(|child| self.nodes.get(child).map(Region::rect))
            .collect();
        let Some((first, rest)) = rects.split_first() else {
            return false;
        };

        let bounds = rest.iter().fold(*first, |acc, rect| acc.union(rect));
        let area: f64 = rects.iter().map(Rect::area).sum();
        let disjoint = rects.iter().enumerate().all(|(i, a)| {
            rects[i + 1..]
                .iter()
                .all(|b| a.intersection_opt(b).is_none())
        });

        bounds.approx_eq(&region.rect) && approx_eq(area, region.rect.area()) && disjoint
    }

    // --- Structural mutation ------------------------------------------------

    /// Cut a leaf into top and bottom children; `ratio` of the height goes to
    /// the top one.
    pub fn split_horizontal(&mut self, id: RegionId, ratio: f64) -> Option<(RegionId, RegionId)> {
        self.split(id, SplitAxis::Horizontal, ratio)
    }

    /// Cut a leaf into left and right children; `ratio` of the width goes to
    /// the left one.
    pub fn split_vertical(&mut self, id: RegionId, ratio: f64) -> Option<(RegionId, RegionId)> {
        self.split(id, SplitAxis::Vertical, ratio)
    }

    /// Cut a leaf in two along `axis`.
    ///
    /// Returns the new `(first, second)` IDs, or `None` when `id` is unknown
    /// or already split. The ratio is not validated: 0 or 1 produces a
    /// zero-area child. The region keeps its background; its content is
    /// discarded because split regions never render content.
    pub fn split(
        &mut self,
        id: RegionId,
        axis: SplitAxis,
        ratio: f64,
    ) -> Option<(RegionId, RegionId)> {
        let Some(region) = self.nodes.get(&id) else {
            debug!(target: TARGET_TREE, region = %id, "split ignored: unknown region");
            return None;
        };
        if region.is_split() {
            debug!(target: TARGET_TREE, region = %id, ?axis, "split ignored: region already has children");
            return None;
        }

        let (first_rect, second_rect) = region.rect.split(axis, ratio);
        let first = self.ids.allocate();
        let second = self.ids.allocate();
        let _ = self.nodes.insert(first, Region::new(first, first_rect, Some(id)));
        let _ = self
            .nodes
            .insert(second, Region::new(second, second_rect, Some(id)));

        if let Some(region) = self.nodes.get_mut(&id) {
            region.children = vec![first, second];
            region.content = None;
        }
        trace!(target: TARGET_TREE, region = %id, ?axis, ratio, %first, %second, "split");
        Some((first, second))
    }

    /// Subdivide a leaf into a regular `rows` x `cols` grid.
    ///
    /// Rows are peeled off one at a time with ratio `1 / (rows - i + 1)` at
    /// step `i`, so every row ends up the same height; each row is then cut
    /// into columns the same way. Returns the grid cells in row-major order,
    /// or `None` when `id` is unknown or already split. A count of 0 or 1
    /// leaves that axis uncut.
    pub fn create_grid(&mut self, id: RegionId, rows: usize, cols: usize) -> Option<Vec<RegionId>> {
        let Some(region) = self.nodes.get(&id) else {
            debug!(target: TARGET_TREE, region = %id, "grid ignored: unknown region");
            return None;
        };
        if region.is_split() {
            debug!(target: TARGET_TREE, region = %id, rows, cols, "grid ignored: region already has children");
            return None;
        }

        let mut remaining = id;
        for step in 1..rows {
            let ratio = 1.0 / (rows - step + 1) as f64;
            let Some((_, rest)) = self.split(remaining, SplitAxis::Horizontal, ratio) else {
                break;
            };
            remaining = rest;
        }

        let row_cells: Vec<RegionId> = self
            .subtree_leaves(id)
            .into_iter()
            .map(Region::id)
            .collect();
        for row in row_cells {
            let mut remaining = row;
            for step in 1..cols {
                let ratio = 1.0 / (cols - step + 1) as f64;
                let Some((_, rest)) = self.split(remaining, SplitAxis::Vertical, ratio) else {
                    break;
                };
                remaining = rest;
            }
        }

        let cells: Vec<RegionId> = self
            .subtree_leaves(id)
            .into_iter()
            .map(Region::id)
            .collect();
        trace!(target: TARGET_TREE, region = %id, rows, cols, cells = cells.len(), "grid");
        Some(cells)
    }

    /// Detach `id` from its parent and drop it, with any descendants.
    ///
    /// Removal is by identity, not position. The surviving sibling is not
    /// resized, so the parent is left untiled until something else fills
    /// the gap. The root cannot be removed. Returns whether anything was
    /// removed.
    pub fn remove(&mut self, id: RegionId) -> bool {
        let Some(region) = self.nodes.get(&id) else {
            debug!(target: TARGET_TREE, region = %id, "remove ignored: unknown region");
            return false;
        };
        let Some(parent) = region.parent else {
            debug!(target: TARGET_TREE, region = %id, "remove ignored: root has no parent");
            return false;
        };

        let doomed: Vec<RegionId> = self.subtree_nodes(id).iter().map(|r| r.id).collect();
        if let Some(parent) = self.nodes.get_mut(&parent) {
            parent.children.retain(|child| *child != id);
        }
        for region in &doomed {
            let _ = self.nodes.remove(region);
        }
        debug!(target: TARGET_TREE, region = %id, %parent, removed = doomed.len(), "removed region");
        true
    }

    // --- Content and style --------------------------------------------------

    /// Assign text and role to a leaf. No-op (returns `false`) on a split or
    /// unknown region.
    pub fn set_content(
        &mut self,
        id: RegionId,
        text: impl Into<String>,
        kind: impl Into<ContentType>,
    ) -> bool {
        let Some(region) = self.nodes.get_mut(&id) else {
            return false;
        };
        if region.is_split() {
            debug!(target: TARGET_TREE, region = %id, "content ignored: region has children");
            return false;
        }
        let content = Content::new(text, kind);
        trace!(target: TARGET_TREE, region = %id, kind = %content.kind, "content set");
        region.content = Some(content);
        true
    }

    /// Assign plain `text` content to a leaf.
    pub fn set_text_content(&mut self, id: RegionId, text: impl Into<String>) -> bool {
        self.set_content(id, text, ContentType::Text)
    }

    /// Remove content from a region. Returns whether there was any.
    pub fn clear_content(&mut self, id: RegionId) -> bool {
        self.nodes
            .get_mut(&id)
            .and_then(|region| region.content.take())
            .is_some()
    }

    /// Set the background color of any region, split or not.
    pub fn set_background_color(&mut self, id: RegionId, color: impl Into<String>) -> bool {
        let Some(region) = self.nodes.get_mut(&id) else {
            return false;
        };
        region.background_color = Some(color.into());
        trace!(target: TARGET_TREE, region = %id, "background set");
        true
    }

    /// Remove the background color. Returns whether there was one.
    pub fn clear_background_color(&mut self, id: RegionId) -> bool {
        self.nodes
            .get_mut(&id)
            .and_then(|region| region.background_color.take())
            .is_some()
    }

    // --- Whole-tree transforms ----------------------------------------------

    /// Rescale the whole tree so the root becomes `width` x `height`.
    ///
    /// Every region's position and size is multiplied by new/old root extent
    /// per axis: an affine scale, not a re-layout. An axis whose old extent is
    /// zero has no ratio; the root takes the new extent and descendants keep
    /// their values on that axis.
    pub fn rescale(&mut self, width: f64, height: f64) {
        let old = self.canvas();
        let width_ratio = if old.width > 0.0 { width / old.width } else { 1.0 };
        let height_ratio = if old.height > 0.0 { height / old.height } else { 1.0 };

        for region in self.nodes.values_mut() {
            region.rect = region.rect.scaled(width_ratio, height_ratio);
        }
        if let Some(root) = self.nodes.get_mut(&self.root) {
            root.rect.width = width;
            root.rect.height = height;
        }
        trace!(target: TARGET_TREE, width, height, width_ratio, height_ratio, "rescaled");
    }

    // --- Serialization ------------------------------------------------------

    /// Canonical nested record of the whole tree.
    #[must_use]
    pub fn serialize(&self) -> RegionRecord {
        self.record_for(self.root_region())
    }

    /// Canonical nested record of the subtree rooted at `id`.
    #[must_use]
    pub fn serialize_subtree(&self, id: RegionId) -> Option<RegionRecord> {
        self.nodes.get(&id).map(|region| self.record_for(region))
    }

    fn record_for(&self, region: &Region) -> RegionRecord {
        RegionRecord {
            id: region.external_id().into_owned(),
            x: region.rect.x,
            y: region.rect.y,
            width: region.rect.width,
            height: region.rect.height,
            content: region.content.as_ref().map(|c| c.text.clone()),
            content_type: region.content.as_ref().map(|c| c.kind.clone()),
            background_color: region.background_color.clone(),
            children: region
                .children
                .iter()
                .filter_map(|child| self.nodes.get(child))
                .map(|child| self.record_for(child))
                .collect(),
        }
    }
}
