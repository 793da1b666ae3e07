use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;

/// Published result of a layout pass
///
/// Immutable once built: a new table is constructed per pass and swapped in
/// whole, so readers never observe a partially-built mapping. Value equality
/// holds between tables built from identical windows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphTable {
    tags: HashMap<String, u32>,
    highest_tag: u32,
}

impl GraphTable {
    pub(crate) fn new(tags: HashMap<String, u32>, highest_tag: u32) -> Self {
        Self { tags, highest_tag }
    }

    /// Lane number for a commit id
    ///
    /// Returns `None` for any id this table has never seen. That is an
    /// expected, frequent condition while the renderer races the background
    /// list growth, not an error.
    pub fn tag(&self, commit_id: &str) -> Option<u32> {
        self.tags.get(commit_id).copied()
    }

    /// Maximum lane number in use, for sizing the drawing surface
    pub fn highest_tag(&self) -> u32 {
        self.highest_tag
    }

    /// Number of commits laid out in this table
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether this table holds no commits at all
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Cloneable, thread-safe view of the latest published [`GraphTable`]
///
/// Publication is an atomic pointer swap held only for the replacement, never
/// for the layout computation. A reader that loaded the previous table keeps
/// a stable snapshot for as long as it holds the `Arc`.
#[derive(Debug, Clone)]
pub struct GraphHandle {
    current: Arc<ArcSwap<GraphTable>>,
    generation: Arc<AtomicU64>,
}

impl GraphHandle {
    /// Create a handle over an empty table
    pub fn new() -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(GraphTable::default())),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Snapshot of the current table
    pub fn load(&self) -> Arc<GraphTable> {
        self.current.load_full()
    }

    /// Lane number for a commit id in the current table
    pub fn tag(&self, commit_id: &str) -> Option<u32> {
        self.current.load().tag(commit_id)
    }

    /// Maximum lane number of the current table
    pub fn highest_tag(&self) -> u32 {
        self.current.load().highest_tag()
    }

    /// Number of tables published so far
    ///
    /// Lets the renderer detect cheaply that a new layout landed without
    /// diffing table contents.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub(crate) fn publish(&self, table: GraphTable) {
        self.current.store(Arc::new(table));
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}

impl Default for GraphHandle {
    fn default() -> Self {
        Self::new()
    }
}
