#![forbid(unsafe_code)]

//! Editing session over one region tree.
//!
//! A [`Document`] owns the tree, applies the editor's rules on top of the raw
//! tree operations, and tells observers about every mutation that actually
//! changed something. Ignored operations (splitting a split region, writing
//! content to an unknown ID) stay silent.

use std::fmt;

use splitframe_core::logging::TARGET_DOCUMENT;
use splitframe_core::{debug, trace};
use splitframe_export::{ExportFormat, HtmlExporter, JsonExporter, JsxExporter};
use splitframe_layout::{ContentType, Region, RegionId, RegionRecord, RegionTree, SplitAxis};

use crate::Result;

/// Header height as a share of the canvas in the starter layout.
pub const STARTER_HEADER_RATIO: f64 = 0.1;
/// Content height as a share of the area below the header.
pub const STARTER_CONTENT_RATIO: f64 = 0.9;
/// Sidebar width as a share of the content row.
pub const STARTER_SIDEBAR_RATIO: f64 = 0.3;

/// Leaves created by [`build_starter_layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarterLayout {
    pub header: RegionId,
    pub sidebar: RegionId,
    pub main: RegionId,
    pub footer: RegionId,
}

/// Lay out header, sidebar, main content and footer on a fresh root leaf.
///
/// Returns `None` if the root is already split.
pub fn build_starter_layout(tree: &mut RegionTree) -> Option<StarterLayout> {
    let (header, rest) = tree.split_horizontal(tree.root(), STARTER_HEADER_RATIO)?;
    let (content, footer) = tree.split_horizontal(rest, STARTER_CONTENT_RATIO)?;
    let (sidebar, main) = tree.split_vertical(content, STARTER_SIDEBAR_RATIO)?;

    tree.set_content(header, "Header", ContentType::Nav);
    tree.set_background_color(header, "#3a86ff");
    tree.set_text_content(sidebar, "Sidebar");
    tree.set_background_color(sidebar, "#f8f9fa");
    tree.set_text_content(main, "Main Content");
    tree.set_background_color(main, "#ffffff");
    tree.set_text_content(footer, "Footer");
    tree.set_background_color(footer, "#212529");

    Some(StarterLayout {
        header,
        sidebar,
        main,
        footer,
    })
}

/// What changed in a document.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentChange {
    /// The tree was replaced (reset or load).
    Replaced,
    Split {
        region: RegionId,
        first: RegionId,
        second: RegionId,
    },
    Grid {
        region: RegionId,
        cells: Vec<RegionId>,
    },
    Content {
        region: RegionId,
    },
    Background {
        region: RegionId,
    },
    Removed {
        region: RegionId,
        parent: RegionId,
    },
    Rescaled {
        width: f64,
        height: f64,
    },
}

/// Handle returned by [`Document::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(u64);

type Observer = Box<dyn FnMut(&DocumentChange)>;

/// One editing session.
pub struct Document {
    tree: RegionTree,
    starter: Option<StarterLayout>,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("tree", &self.tree)
            .field("starter", &self.starter)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::from_tree(RegionTree::default())
    }
}

impl Document {
    /// Blank document: one root leaf covering the canvas.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self::from_tree(RegionTree::with_canvas(width, height))
    }

    /// Document pre-filled with the starter layout.
    #[must_use]
    pub fn with_starter_layout(width: f64, height: f64) -> Self {
        let mut tree = RegionTree::with_canvas(width, height);
        let starter = build_starter_layout(&mut tree);
        Self {
            starter,
            ..Self::from_tree(tree)
        }
    }

    /// Document over an existing tree.
    #[must_use]
    pub fn from_tree(tree: RegionTree) -> Self {
        Self {
            tree,
            starter: None,
            observers: Vec::new(),
            next_observer: 1,
        }
    }

    /// Rebuild a document from its canonical record.
    pub fn from_record(record: &RegionRecord) -> Result<Self> {
        Ok(Self::from_tree(RegionTree::from_record(record)?))
    }

    /// Rebuild a document from a JSON export.
    pub fn from_json(json: &str) -> Result<Self> {
        let record = JsonExporter::default().parse(json)?;
        Self::from_record(&record)
    }

    // --- Accessors ----------------------------------------------------------

    #[must_use]
    pub const fn tree(&self) -> &RegionTree {
        &self.tree
    }

    /// Starter leaves, when this document was created with them.
    #[must_use]
    pub const fn starter(&self) -> Option<&StarterLayout> {
        self.starter.as_ref()
    }

    /// Deepest region under a canvas point.
    #[must_use]
    pub fn region_at(&self, x: f64, y: f64) -> Option<&Region> {
        self.tree.find_node_at(x, y)
    }

    // --- Observers ----------------------------------------------------------

    /// Register a callback run after every effective mutation.
    pub fn subscribe(&mut self, observer: impl FnMut(&DocumentChange) + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Drop a callback. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer, _)| *observer != id);
        self.observers.len() != before
    }

    fn notify(&mut self, change: DocumentChange) {
        trace!(
            target: TARGET_DOCUMENT,
            ?change,
            observers = self.observers.len(),
            "notify"
        );
        for (_, observer) in &mut self.observers {
            observer(&change);
        }
    }

    // --- Session ------------------------------------------------------------

    /// Discard the tree and start over on a `width` x `height` canvas.
    pub fn reset(&mut self, width: f64, height: f64, starter: bool) {
        let mut tree = RegionTree::with_canvas(width, height);
        self.starter = if starter {
            build_starter_layout(&mut tree)
        } else {
            None
        };
        self.tree = tree;
        debug!(target: TARGET_DOCUMENT, width, height, starter, "document reset");
        self.notify(DocumentChange::Replaced);
    }

    /// Replace the tree with one rebuilt from `record`.
    ///
    /// On error the document is left untouched.
    pub fn load(&mut self, record: &RegionRecord) -> Result<()> {
        self.tree = RegionTree::from_record(record)?;
        self.starter = None;
        self.notify(DocumentChange::Replaced);
        Ok(())
    }

    // --- Edits --------------------------------------------------------------

    pub fn split(
        &mut self,
        id: RegionId,
        axis: SplitAxis,
        ratio: f64,
    ) -> Option<(RegionId, RegionId)> {
        let (first, second) = self.tree.split(id, axis, ratio)?;
        self.notify(DocumentChange::Split {
            region: id,
            first,
            second,
        });
        Some((first, second))
    }

    pub fn create_grid(&mut self, id: RegionId, rows: usize, cols: usize) -> Option<Vec<RegionId>> {
        let cells = self.tree.create_grid(id, rows, cols)?;
        // A 1x1 grid leaves the region as it was.
        if cells.len() > 1 {
            self.notify(DocumentChange::Grid {
                region: id,
                cells: cells.clone(),
            });
        }
        Some(cells)
    }

    pub fn set_content(
        &mut self,
        id: RegionId,
        text: impl Into<String>,
        kind: impl Into<ContentType>,
    ) -> bool {
        let changed = self.tree.set_content(id, text, kind);
        if changed {
            self.notify(DocumentChange::Content { region: id });
        }
        changed
    }

    pub fn set_background_color(&mut self, id: RegionId, color: impl Into<String>) -> bool {
        let changed = self.tree.set_background_color(id, color);
        if changed {
            self.notify(DocumentChange::Background { region: id });
        }
        changed
    }

    /// Delete a region, unless it is the root or its parent's last child.
    pub fn remove_region(&mut self, id: RegionId) -> bool {
        let Some(parent) = self.tree.parent(id) else {
            debug!(target: TARGET_DOCUMENT, region = %id, "remove refused: no parent");
            return false;
        };
        if self.tree.children(parent).len() <= 1 {
            debug!(target: TARGET_DOCUMENT, region = %id, %parent, "remove refused: last child");
            return false;
        }
        if !self.tree.remove(id) {
            return false;
        }
        self.notify(DocumentChange::Removed { region: id, parent });
        true
    }

    /// Rescale the canvas. Does nothing when the size is unchanged.
    pub fn rescale(&mut self, width: f64, height: f64) -> bool {
        let canvas = self.tree.canvas();
        if canvas.width == width && canvas.height == height {
            return false;
        }
        self.tree.rescale(width, height);
        self.notify(DocumentChange::Rescaled { width, height });
        true
    }

    /// Drop a component onto the leaf under a canvas point.
    ///
    /// The leaf gets `kind` as its content type and the type's label as its
    /// text. Returns the affected region, or `None` when the point misses the
    /// canvas or lands on a split region.
    pub fn apply_tool(&mut self, x: f64, y: f64, kind: impl Into<ContentType>) -> Option<RegionId> {
        let kind = kind.into();
        let hit = self.tree.find_node_at(x, y)?;
        if hit.is_split() {
            debug!(target: TARGET_DOCUMENT, region = %hit.id(), x, y, "tool ignored: region has children");
            return None;
        }
        let id = hit.id();
        let label = kind.label();
        self.set_content(id, label, kind).then_some(id)
    }

    // --- Export -------------------------------------------------------------

    /// Export with the default translator configuration for `format`.
    pub fn export(&self, format: ExportFormat) -> Result<String> {
        Ok(splitframe_export::export(&self.tree, format)?)
    }

    #[must_use]
    pub fn export_html(&self, exporter: &HtmlExporter) -> String {
        exporter.export(&self.tree)
    }

    #[must_use]
    pub fn export_jsx(&self, exporter: &JsxExporter) -> String {
        exporter.export(&self.tree)
    }

    pub fn export_json(&self, exporter: &JsonExporter) -> Result<String> {
        Ok(exporter.export(&self.tree)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    fn recorder(doc: &mut Document) -> (ObserverId, Rc<RefCell<Vec<DocumentChange>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let id = doc.subscribe(move |change| sink.borrow_mut().push(change.clone()));
        (id, log)
    }

    #[test]
    fn starter_layout_has_four_leaves() {
        let doc = Document::with_starter_layout(1440.0, 900.0);
        let starter = doc.starter().expect("starter layout");
        let tree = doc.tree();
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.leaves().len(), 4);

        let header = tree.node(starter.header).expect("header");
        assert_eq!(header.text(), Some("Header"));
        assert_eq!(header.content_type(), Some(&ContentType::Nav));
        assert_eq!(header.background_color(), Some("#3a86ff"));
        let footer = tree.node(starter.footer).expect("footer");
        assert_eq!(footer.background_color(), Some("#212529"));
        assert_eq!(footer.content_type(), Some(&ContentType::Text));
    }

    #[test]
    fn effective_edits_notify_once() {
        let mut doc = Document::new(800.0, 600.0);
        let (_, log) = recorder(&mut doc);
        let root = doc.tree().root();

        let (top, bottom) = doc.split(root, SplitAxis::Horizontal, 0.5).expect("split");
        assert!(doc.set_content(top, "Title", "text"));
        assert!(doc.set_background_color(bottom, "#eee"));

        let log = log.borrow();
        assert_eq!(log.len(), 3);
        assert_eq!(
            log[0],
            DocumentChange::Split {
                region: root,
                first: top,
                second: bottom
            }
        );
        assert_eq!(log[1], DocumentChange::Content { region: top });
        assert_eq!(log[2], DocumentChange::Background { region: bottom });
    }

    #[test]
    fn ignored_edits_stay_silent() {
        let mut doc = Document::new(800.0, 600.0);
        let root = doc.tree().root();
        let _ = doc.split(root, SplitAxis::Vertical, 0.5);
        let (_, log) = recorder(&mut doc);

        assert_eq!(doc.split(root, SplitAxis::Horizontal, 0.5), None);
        assert_eq!(doc.create_grid(root, 2, 2), None);
        assert!(!doc.set_content(root, "x", "text"));
        assert!(!doc.remove_region(root));
        assert!(!doc.rescale(800.0, 600.0));
        let leaf = doc.tree().leaves()[0].id();
        assert_eq!(doc.create_grid(leaf, 1, 1), Some(vec![leaf]));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn remove_guard_keeps_last_child() {
        let mut doc = Document::new(800.0, 600.0);
        let root = doc.tree().root();
        let (top, bottom) = doc.split(root, SplitAxis::Horizontal, 0.5).expect("split");

        assert!(doc.remove_region(bottom));
        assert!(!doc.remove_region(top), "last child must stay");
        assert_eq!(doc.tree().children(root), &[top]);
    }

    #[test]
    fn apply_tool_labels_the_hit_leaf() {
        let mut doc = Document::with_starter_layout(1440.0, 900.0);
        let starter = *doc.starter().expect("starter layout");
        let (_, log) = recorder(&mut doc);

        assert_eq!(doc.apply_tool(900.0, 400.0, "button"), Some(starter.main));
        let main = doc.tree().node(starter.main).expect("main");
        assert_eq!(main.text(), Some("Button"));
        assert_eq!(main.content_type(), Some(&ContentType::Button));
        assert_eq!(log.borrow().len(), 1);

        assert_eq!(doc.apply_tool(5000.0, 400.0, "card"), None);
    }

    #[test]
    fn apply_tool_on_a_gap_is_ignored() {
        let mut doc = Document::new(100.0, 100.0);
        let root = doc.tree().root();
        let (_, bottom) = doc.split(root, SplitAxis::Horizontal, 0.5).expect("split");
        assert!(doc.remove_region(bottom));
        assert_eq!(doc.apply_tool(50.0, 90.0, "image"), None);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut doc = Document::new(100.0, 100.0);
        let (id, log) = recorder(&mut doc);
        assert!(doc.unsubscribe(id));
        assert!(!doc.unsubscribe(id));
        doc.reset(200.0, 200.0, false);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn reset_replaces_the_tree() {
        let mut doc = Document::with_starter_layout(1440.0, 900.0);
        let (_, log) = recorder(&mut doc);
        doc.reset(375.0, 667.0, false);
        assert_eq!(doc.tree().len(), 1);
        assert!(doc.starter().is_none());
        assert_eq!(doc.tree().canvas().width, 375.0);
        assert_eq!(log.borrow().as_slice(), &[DocumentChange::Replaced]);

        doc.reset(1440.0, 900.0, true);
        assert!(doc.starter().is_some());
    }

    #[test]
    fn rescale_notifies_with_new_size() {
        let mut doc = Document::with_starter_layout(1440.0, 900.0);
        let (_, log) = recorder(&mut doc);
        assert!(doc.rescale(768.0, 1024.0));
        assert_eq!(
            log.borrow().as_slice(),
            &[DocumentChange::Rescaled {
                width: 768.0,
                height: 1024.0
            }]
        );
    }

    #[test]
    fn json_round_trip_through_documents() {
        let doc = Document::with_starter_layout(1440.0, 900.0);
        let json = doc.export(ExportFormat::Json).expect("json export");
        let reloaded = Document::from_json(&json).expect("json loads");
        assert_eq!(reloaded.export(ExportFormat::Json).expect("json export"), json);
        assert_eq!(
            reloaded.export(ExportFormat::Html).expect("html export"),
            doc.export(ExportFormat::Html).expect("html export")
        );
    }

    #[test]
    fn failed_load_leaves_document_untouched() {
        let mut doc = Document::with_starter_layout(1440.0, 900.0);
        let mut record = doc.tree().serialize();
        record.children[0].width = f64::NAN;
        assert!(doc.load(&record).is_err());
        assert_eq!(doc.tree().len(), 7);
    }

    fn id_set(doc: &Document) -> HashSet<RegionId> {
        doc.tree().all_nodes().iter().map(|region| region.id()).collect()
    }

    #[test]
    fn ids_after_reset_never_reuse_earlier_ones() {
        let mut doc = Document::with_starter_layout(1440.0, 900.0);
        let before = id_set(&doc);
        let stale = doc.starter().expect("starter layout").main;

        doc.reset(1440.0, 900.0, true);
        let after = id_set(&doc);
        assert_eq!(after.len(), 7);
        assert!(before.is_disjoint(&after), "{before:?} vs {after:?}");
        assert!(doc.tree().node(stale).is_none());
        assert!(!doc.set_content(stale, "Stale", "text"));
    }

    #[test]
    fn separate_documents_never_share_ids() {
        let first = Document::with_starter_layout(800.0, 600.0);
        let second = Document::with_starter_layout(800.0, 600.0);
        assert_ne!(first.tree().root(), second.tree().root());
        assert!(id_set(&first).is_disjoint(&id_set(&second)));
    }

    #[test]
    fn loaded_names_survive_a_session() {
        let json = r#"{"id":"node-k3j9x2abc","x":0.0,"y":0.0,"width":400.0,"height":300.0,"content":null,"contentType":null,"backgroundColor":null,"children":[{"id":"hero","x":0.0,"y":0.0,"width":400.0,"height":150.0,"content":"Hi","contentType":"text","backgroundColor":null,"children":[]},{"id":"node-9","x":0.0,"y":150.0,"width":400.0,"height":150.0,"content":null,"contentType":null,"backgroundColor":null,"children":[]}]}"#;
        let mut doc = Document::from_json(json).expect("json loads");
        let exporter = JsonExporter { pretty: false };
        assert_eq!(doc.export_json(&exporter).expect("json export"), json);

        let hero = doc.tree().resolve("hero").expect("loaded name resolves");
        let (top, _) = doc.split(hero, SplitAxis::Vertical, 0.5).expect("split");
        let record = doc.tree().serialize();
        assert_eq!(record.children[0].id, "hero");
        let minted = record.children[0].children[0].id.clone();
        assert_eq!(minted, top.to_string());
        assert!(!["node-k3j9x2abc", "hero", "node-9"].contains(&minted.as_str()));
    }
}
