//! Per-diagram viewport state, shared by every open diagram.
//!
//! The store is a striped map: identities hash onto a fixed set of shards,
//! each guarded by its own [`RwLock`], so diagrams touching different keys
//! rarely contend. Every accessor is a read-modify-or-insert: the first
//! reference to an unseen identity creates its entry with default values.
//! Entries are never evicted.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::OnceCell;

use crate::geometry::Rect;
use crate::identity::DiagramId;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewportState {
    /// Hierarchy path of the last tapped node (may carry a repeat-click marker).
    pub clicked_element_path: String,
    pub clicked_element_rect: Option<Rect>,
    pub clicked_element_parent_rect: Option<Rect>,
    /// Rectangle the viewport should be fitted to next, if any.
    pub zoom_target: Option<Rect>,
    /// Element count of the previous build.
    pub element_count: usize,
    pub max_width: f32,
    pub max_height: f32,
}

const SHARDS: usize = 16;

type Shard = RwLock<HashMap<DiagramId, ViewportState>>;

pub struct ViewportStore {
    shards: Vec<Shard>,
}

impl Default for ViewportStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportStore {
    pub fn new() -> Self {
        Self {
            shards: (0..SHARDS).map(|_| RwLock::new(HashMap::new())).collect(),
        }
    }

    fn shard(&self, id: DiagramId) -> &Shard {
        let mixed = id.0 ^ (id.0 >> 32);
        &self.shards[(mixed % SHARDS as u64) as usize]
    }

    /// Snapshot of the state for `id`, creating a default entry if missing.
    pub fn get_or_create(&self, id: DiagramId) -> ViewportState {
        if let Some(state) = self.get(id) {
            return state;
        }
        self.update(id, |s| s.clone())
    }

    /// Snapshot of the state for `id` without creating it.
    pub fn get(&self, id: DiagramId) -> Option<ViewportState> {
        let r = self.shard(id).read().unwrap_or_else(PoisonError::into_inner);
        r.get(&id).cloned()
    }

    /// Atomically modify the state for `id`, creating it first if missing.
    pub fn update<R>(&self, id: DiagramId, f: impl FnOnce(&mut ViewportState) -> R) -> R {
        let mut w = self.shard(id).write().unwrap_or_else(PoisonError::into_inner);
        f(w.entry(id).or_default())
    }

    pub fn contains(&self, id: DiagramId) -> bool {
        let r = self.shard(id).read().unwrap_or_else(PoisonError::into_inner);
        r.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.shards
            .iter()
            .map(|s| s.read().unwrap_or_else(PoisonError::into_inner).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clicked_path(&self, id: DiagramId) -> String {
        self.update(id, |s| s.clicked_element_path.clone())
    }

    pub fn set_clicked_path(&self, id: DiagramId, path: impl Into<String>) {
        let path = path.into();
        self.update(id, |s| s.clicked_element_path = path);
    }

    pub fn clicked_rect(&self, id: DiagramId) -> Option<Rect> {
        self.update(id, |s| s.clicked_element_rect)
    }

    pub fn set_clicked_rect(&self, id: DiagramId, rect: Option<Rect>) {
        self.update(id, |s| s.clicked_element_rect = rect);
    }

    pub fn clicked_parent_rect(&self, id: DiagramId) -> Option<Rect> {
        self.update(id, |s| s.clicked_element_parent_rect)
    }

    pub fn set_clicked_parent_rect(&self, id: DiagramId, rect: Option<Rect>) {
        self.update(id, |s| s.clicked_element_parent_rect = rect);
    }

    pub fn zoom_target(&self, id: DiagramId) -> Option<Rect> {
        self.update(id, |s| s.zoom_target)
    }

    pub fn set_zoom_target(&self, id: DiagramId, rect: Option<Rect>) {
        self.update(id, |s| s.zoom_target = rect);
    }

    pub fn element_count(&self, id: DiagramId) -> usize {
        self.update(id, |s| s.element_count)
    }

    pub fn set_element_count(&self, id: DiagramId, count: usize) {
        self.update(id, |s| s.element_count = count);
    }

    /// Diagram extents as `(max_width, max_height)`.
    pub fn extents(&self, id: DiagramId) -> (f32, f32) {
        self.update(id, |s| (s.max_width, s.max_height))
    }

    pub fn set_extents(&self, id: DiagramId, max_width: f32, max_height: f32) {
        self.update(id, |s| {
            s.max_width = max_width;
            s.max_height = max_height;
        });
    }
}

static STORE: OnceCell<Arc<ViewportStore>> = OnceCell::new();

/// Process-wide store shared by all diagrams that do not bring their own.
pub fn global_store() -> Arc<ViewportStore> {
    STORE.get_or_init(|| Arc::new(ViewportStore::new())).clone()
}
