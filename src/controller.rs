//! Expand/collapse controller.
//!
//! A [`DiagramSession`] owns one open diagram: its element list, renderer and
//! pending backend request. It shares per-diagram viewport state with other
//! sessions through a [`ViewportStore`].
//!
//! Tapping a composite node below the top level stores its path as the
//! clicked path and asks the backend for the subgraph at that path. The
//! backend call and the document parse run on a worker thread; results come
//! back over a channel and are applied by [`DiagramSession::poll`] from the
//! render thread. When the rebuilt list has more elements than the previous
//! one the viewport zooms to the clicked node, otherwise to its parent.
//!
//! Any other node tap navigates to the node's source location.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::backend::{SourceEditor, SubgraphBackend};
use crate::builder::{BuildOptions, BuildOutput, GraphBuilder};
use crate::config::ViewerConfig;
use crate::geometry::{Point, Rect};
use crate::hit::{Hit, TapResult, resolve_tap};
use crate::identity::DiagramId;
use crate::model::{ElementKind, LayoutNode, RenderElement};
use crate::navigation::{parent_path, strip_marker};
use crate::render::{Canvas, DiagramRenderer, StyleLookup};
use crate::source::{LineRemapper, SourceLocation, resolve_source};
use crate::store::ViewportStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Expansion,
    Collapse,
}

/// More elements than before means the clicked node was opened up.
pub fn classify(previous_count: usize, new_count: usize) -> Transition {
    if new_count > previous_count {
        Transition::Expansion
    } else {
        Transition::Collapse
    }
}

/// Rectangle to zoom to after a rebuild.
pub fn zoom_target(
    transition: Transition,
    clicked_rect: Option<Rect>,
    clicked_parent_rect: Option<Rect>,
) -> Option<Rect> {
    match transition {
        Transition::Expansion => clicked_rect,
        Transition::Collapse => clicked_parent_rect,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TapAction {
    /// Nothing under the pointer.
    None,
    EdgeHighlight { index: usize, highlighted: bool },
    /// A label, port, junction, or a node without a usable source location.
    Selected(Hit),
    /// A subgraph for `path` was requested from the backend.
    ExpandRequested { path: String },
    /// The editor was asked to open this location.
    OpenSource(SourceLocation),
}

struct PendingRequest {
    generation: u64,
    path: String,
    /// Clicked path to restore if the request fails.
    previous_clicked: String,
    started: Instant,
}

struct SubgraphReply {
    generation: u64,
    result: Result<LayoutNode>,
}

pub struct DiagramSession {
    id: DiagramId,
    config: ViewerConfig,
    store: Arc<ViewportStore>,
    elements: Vec<RenderElement>,
    renderer: DiagramRenderer,
    origin: Point,
    scale: f32,
    current: Option<Hit>,
    backend: Option<Arc<dyn SubgraphBackend>>,
    editor: Option<Box<dyn SourceEditor>>,
    remapper: Option<Box<dyn LineRemapper>>,
    generation: u64,
    pending: Option<PendingRequest>,
    tx: Sender<SubgraphReply>,
    rx: Receiver<SubgraphReply>,
}

impl DiagramSession {
    /// Open a diagram from its source path and document text.
    pub fn open(
        source_path: &str,
        content: &str,
        config: ViewerConfig,
        store: Arc<ViewportStore>,
    ) -> Result<Self> {
        let id = DiagramId::new(source_path, content);
        let doc = LayoutNode::from_json_str(content)?;
        log::info!("opening diagram {} from {}", id, source_path);
        Ok(Self::from_document(id, &doc, config, store))
    }

    pub fn from_document(
        id: DiagramId,
        doc: &LayoutNode,
        config: ViewerConfig,
        store: Arc<ViewportStore>,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut session = Self {
            id,
            renderer: DiagramRenderer::new(config.render.clone()),
            config,
            store,
            elements: Vec::new(),
            origin: Point::ZERO,
            scale: 1.0,
            current: None,
            backend: None,
            editor: None,
            remapper: None,
            generation: 0,
            pending: None,
            tx,
            rx,
        };
        session.apply_document(doc);
        session
    }

    pub fn with_backend(mut self, backend: Arc<dyn SubgraphBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn with_editor(mut self, editor: Box<dyn SourceEditor>) -> Self {
        self.editor = Some(editor);
        self
    }

    pub fn with_remapper(mut self, remapper: Box<dyn LineRemapper>) -> Self {
        self.remapper = Some(remapper);
        self
    }

    pub fn id(&self) -> DiagramId {
        self.id
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<ViewportStore> {
        &self.store
    }

    pub fn elements(&self) -> &[RenderElement] {
        &self.elements
    }

    pub fn renderer(&self) -> &DiagramRenderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut DiagramRenderer {
        &mut self.renderer
    }

    /// Element selected by the last non-edge tap.
    pub fn current_element(&self) -> Option<&RenderElement> {
        self.current.and_then(|h| self.elements.get(h.index))
    }

    /// Clicked path without any repeat-click marker.
    pub fn clicked_path(&self) -> String {
        let stored = self.store.clicked_path(self.id);
        strip_marker(&stored, self.config.interaction.repeat_click_marker).to_string()
    }

    pub fn render_if_dirty(&mut self, canvas: &mut dyn Canvas, styles: &dyn StyleLookup) -> bool {
        self.renderer.render_if_dirty(&self.elements, canvas, styles)
    }

    /// Unconditional render, for immediate-mode hosts that redraw every frame.
    pub fn render(&mut self, canvas: &mut dyn Canvas, styles: &dyn StyleLookup) {
        self.renderer.render(&self.elements, canvas, styles);
    }

    /// Rebuild from `doc`, classify the change against the previous build and
    /// zoom to the resulting target.
    pub fn apply_document(&mut self, doc: &LayoutNode) -> Transition {
        let clicked = self.clicked_path();
        let out = GraphBuilder::new(&self.config.build).build(
            doc,
            &BuildOptions {
                x_ref: self.origin.x,
                y_ref: self.origin.y,
                scale: self.scale,
                clicked_path: &clicked,
            },
        );
        let previous = self.store.element_count(self.id);
        let transition = classify(previous, out.elements.len());
        let target = zoom_target(transition, out.clicked_rect, out.clicked_parent_rect);
        log::debug!(
            "diagram {}: {:?} ({} -> {} elements), clicked '{}'",
            self.id,
            transition,
            previous,
            out.elements.len(),
            clicked
        );
        self.commit(out, target);
        transition
    }

    fn commit(&mut self, out: BuildOutput, target: Option<Rect>) {
        self.store.update(self.id, |s| {
            s.clicked_element_rect = out.clicked_rect;
            s.clicked_element_parent_rect = out.clicked_parent_rect;
            s.element_count = out.elements.len();
            s.max_width = out.max_width;
            s.max_height = out.max_height;
            s.zoom_target = target;
        });
        self.elements = out.elements;
        self.current = None;
        self.renderer.reset_frame(&self.elements);
        self.zoom_to_fit();
    }

    fn extents_rect(&self) -> Rect {
        let (w, h) = self.store.extents(self.id);
        Rect::from_min_max(self.origin, Point::new(w, h))
    }

    /// Fit the last zoom target, or the whole diagram when there is none.
    pub fn zoom_to_fit(&mut self) -> bool {
        let target = self
            .store
            .zoom_target(self.id)
            .unwrap_or_else(|| self.extents_rect());
        self.renderer.zoom_to_fit(&target)
    }

    /// Fit the whole diagram.
    pub fn zoom_to_extents(&mut self) -> bool {
        let target = self.extents_rect();
        self.renderer.zoom_to_fit(&target)
    }

    /// Hit-test a tap at screen position `p` and act on it.
    pub fn tap(&mut self, p: Point) -> TapAction {
        let tolerance = self.config.render.edge_hit_tolerance;
        match resolve_tap(&mut self.elements, self.renderer.rendered(), p, tolerance) {
            TapResult::Miss => TapAction::None,
            TapResult::EdgeHighlight { index, highlighted } => {
                self.renderer.invalidate();
                TapAction::EdgeHighlight { index, highlighted }
            }
            TapResult::Element(hit) => {
                self.current = Some(hit);
                if hit.kind == ElementKind::Node {
                    self.tap_node(hit)
                } else {
                    TapAction::Selected(hit)
                }
            }
        }
    }

    fn tap_node(&mut self, hit: Hit) -> TapAction {
        let Some(e) = self.elements.get(hit.index) else {
            return TapAction::None;
        };
        let interaction = &self.config.interaction;
        let composite = e.cell_type.is_empty() || e.cell_type == interaction.composite_cell_type;
        if composite && e.depth != 1 {
            let path = e.hierarchy_path.clone();
            let stored = self.store.clicked_path(self.id);
            let next = if stored == path {
                format!("{}{}", path, interaction.repeat_click_marker)
            } else {
                path.clone()
            };
            self.store.set_clicked_path(self.id, next);
            self.request_subgraph_inner(&path, stored);
            return TapAction::ExpandRequested { path };
        }

        match resolve_source(&e.source_location, self.remapper.as_deref()) {
            Ok(loc) => {
                log::debug!("diagram {}: navigating to {}:{}", self.id, loc.file, loc.line);
                if let Some(editor) = &self.editor {
                    if let Err(err) = editor.open(&loc) {
                        log::warn!("failed to open {}: {:#}", loc.file, err);
                    }
                }
                TapAction::OpenSource(loc)
            }
            Err(err) => {
                log::debug!("diagram {}: no source for '{}': {}", self.id, e.hierarchy_path, err);
                TapAction::Selected(hit)
            }
        }
    }

    /// Ask the backend for the subgraph at `path` without touching the
    /// clicked path.
    pub fn request_subgraph(&mut self, path: &str) -> bool {
        let stored = self.store.clicked_path(self.id);
        self.request_subgraph_inner(path, stored)
    }

    /// Make `path` the clicked node and fetch its subgraph, as a tap on that
    /// node would (without the repeat-click marker).
    pub fn expand(&mut self, path: &str) -> bool {
        let stored = self.store.clicked_path(self.id);
        self.store.set_clicked_path(self.id, path);
        self.request_subgraph_inner(path, stored)
    }

    /// Collapse the current clicked node by requesting its parent's subgraph.
    pub fn request_parent(&mut self) -> bool {
        let clicked = self.clicked_path();
        if clicked.is_empty() {
            return false;
        }
        let parent = parent_path(&clicked).to_string();
        let stored = self.store.clicked_path(self.id);
        self.store.set_clicked_path(self.id, parent.clone());
        self.request_subgraph_inner(&parent, stored)
    }

    fn request_subgraph_inner(&mut self, path: &str, previous_clicked: String) -> bool {
        let Some(backend) = self.backend.clone() else {
            log::warn!("diagram {}: no backend to fetch subgraph '{}'", self.id, path);
            return false;
        };
        self.generation += 1;
        let generation = self.generation;
        let id = self.id;
        let tx = self.tx.clone();
        let owned_path = path.to_string();
        // A superseded request never applied its path; keep its restore point.
        let previous_clicked = self
            .pending
            .take()
            .map(|p| p.previous_clicked)
            .unwrap_or(previous_clicked);
        self.pending = Some(PendingRequest {
            generation,
            path: owned_path.clone(),
            previous_clicked,
            started: Instant::now(),
        });
        thread::spawn(move || {
            let result = backend
                .fetch_subgraph(id, &owned_path)
                .and_then(|text| LayoutNode::from_json_str(&text));
            // The session may be gone; nothing to do then.
            let _ = tx.send(SubgraphReply { generation, result });
        });
        true
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Path of the outstanding subgraph request.
    pub fn pending_path(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.path.as_str())
    }

    /// How long the outstanding request has been running.
    pub fn pending_elapsed(&self) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.started.elapsed())
    }

    /// Drop the outstanding request; its result is ignored when it arrives.
    pub fn cancel_pending(&mut self) {
        if let Some(p) = self.pending.take() {
            log::info!("diagram {}: dropped request for '{}'", self.id, p.path);
            self.store.set_clicked_path(self.id, p.previous_clicked);
        }
    }

    /// Apply a finished subgraph request, if any. Returns the transition when
    /// a new document was applied.
    pub fn poll(&mut self) -> Option<Transition> {
        loop {
            match self.rx.try_recv() {
                Ok(reply) => {
                    if let Some(t) = self.handle_reply(reply) {
                        return Some(t);
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }

    /// Block until the outstanding request finishes or `timeout` elapses.
    /// On timeout the request is dropped.
    pub fn wait_pending(&mut self, timeout: Duration) -> Option<Transition> {
        let deadline = Instant::now() + timeout;
        while self.pending.is_some() {
            let left = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(left) {
                Ok(reply) => {
                    if let Some(t) = self.handle_reply(reply) {
                        return Some(t);
                    }
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    self.cancel_pending();
                    return None;
                }
            }
        }
        None
    }

    fn handle_reply(&mut self, reply: SubgraphReply) -> Option<Transition> {
        let current = self
            .pending
            .as_ref()
            .is_some_and(|p| p.generation == reply.generation);
        if !current {
            log::info!("diagram {}: ignoring stale subgraph reply", self.id);
            return None;
        }
        let pending = self.pending.take()?;
        match reply.result {
            Ok(doc) => Some(self.apply_document(&doc)),
            Err(err) => {
                log::warn!(
                    "diagram {}: subgraph '{}' failed: {:#}",
                    self.id,
                    pending.path,
                    err
                );
                self.store.set_clicked_path(self.id, pending.previous_clicked);
                None
            }
        }
    }
}
