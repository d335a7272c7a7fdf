//! Incremental renderer: applies pending pan/zoom, culls by ancestor
//! visibility and viewport intersection, draws through a [`Canvas`], and
//! records the screen geometry of everything drawn for hit-testing.
//!
//! Culling relies on the element list being in depth-first pre-order (see
//! [`crate::builder::check_preorder`]). Two pieces of state carry the
//! hierarchy through the pass:
//!
//! - `last_visible_depth`: depth of the deepest node on the current ancestor
//!   chain that was drawn (0 for the synthetic root). A node deeper than
//!   `last_visible_depth + 1` has an undrawn parent and is skipped.
//! - `prev_node_in_view`: whether the most recent node was drawn. Labels,
//!   ports, edges and junctions always follow their owning node, so they are
//!   skipped when it is false.

use crate::builder::check_preorder;
use crate::config::RenderConfig;
use crate::geometry::{Circle, Point, Rect, Segment};
use crate::model::{ElementKind, RenderElement};
use crate::viewport::{InputDeltas, ViewTransform};

/// Simple RGB color independent of any UI toolkit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub stroke: Rgb,
    pub fill: Option<Rgb>,
    pub width: f32,
}

/// Opaque style resolution; themes live outside the engine.
pub trait StyleLookup {
    fn style(&self, element: &RenderElement) -> Style;

    /// Overlay drawn on top of highlighted edge segments.
    fn highlight(&self) -> Style {
        Style {
            stroke: Rgb(255, 140, 0),
            fill: None,
            width: 3.0,
        }
    }
}

/// Light theme used when the host provides none.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultStyle;

impl StyleLookup for DefaultStyle {
    fn style(&self, element: &RenderElement) -> Style {
        match element.kind {
            ElementKind::Node => Style {
                stroke: Rgb(90, 90, 110),
                fill: Some(Rgb(235, 238, 245)),
                width: 1.0,
            },
            ElementKind::Edge => Style {
                stroke: Rgb(40, 40, 40),
                fill: None,
                width: 1.0,
            },
            ElementKind::Label => Style {
                stroke: Rgb(20, 20, 20),
                fill: None,
                width: 1.0,
            },
            ElementKind::Junction => Style {
                stroke: Rgb(40, 40, 40),
                fill: Some(Rgb(40, 40, 40)),
                width: 1.0,
            },
            ElementKind::Port => Style {
                stroke: Rgb(60, 60, 60),
                fill: Some(Rgb(60, 60, 60)),
                width: 1.0,
            },
        }
    }
}

/// Drawing surface in screen coordinates.
pub trait Canvas {
    fn rect(&mut self, rect: Rect, style: &Style);
    fn line(&mut self, segment: Segment, style: &Style);
    fn circle(&mut self, circle: Circle, style: &Style);
    fn text(&mut self, pos: Point, text: &str, font_size: f32, style: &Style);
}

/// Screen-space shape drawn for element `element` (an index into the list).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rendered<T> {
    pub element: usize,
    pub shape: T,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedSegment {
    pub segment: Segment,
    /// Part of the synthesized arrowhead.
    pub arrow: bool,
}

/// Geometry drawn in the last frame, per kind, in draw order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedGeometry {
    pub nodes: Vec<Rendered<Rect>>,
    pub edges: Vec<Rendered<RenderedSegment>>,
    pub junctions: Vec<Rendered<Circle>>,
    pub labels: Vec<Rendered<Rect>>,
    pub ports: Vec<Rendered<Rect>>,
}

impl RenderedGeometry {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
            && self.edges.is_empty()
            && self.junctions.is_empty()
            && self.labels.is_empty()
            && self.ports.is_empty()
    }

    /// Whether any shape was recorded for element `index`.
    pub fn contains_element(&self, index: usize) -> bool {
        self.nodes.iter().any(|r| r.element == index)
            || self.edges.iter().any(|r| r.element == index)
            || self.junctions.iter().any(|r| r.element == index)
            || self.labels.iter().any(|r| r.element == index)
            || self.ports.iter().any(|r| r.element == index)
    }
}

pub struct DiagramRenderer {
    config: RenderConfig,
    transform: ViewTransform,
    deltas: InputDeltas,
    viewport: Rect,
    dirty: bool,
    pending_fit: Option<Rect>,
    rendered: RenderedGeometry,
}

impl DiagramRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            transform: ViewTransform::default(),
            deltas: InputDeltas::default(),
            viewport: Rect::default(),
            dirty: true,
            pending_fit: None,
            rendered: RenderedGeometry::default(),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn set_transform(&mut self, t: ViewTransform) {
        self.transform = t;
        self.dirty = true;
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Set the visible screen rectangle. A zoom-to-fit requested while the
    /// viewport was still empty is carried out now.
    pub fn set_viewport(&mut self, viewport: Rect) {
        if viewport != self.viewport {
            self.viewport = viewport;
            self.dirty = true;
        }
        if let Some(target) = self.pending_fit.take() {
            self.zoom_to_fit(&target);
        }
    }

    pub fn rendered(&self) -> &RenderedGeometry {
        &self.rendered
    }

    pub fn pending_input(&self) -> &InputDeltas {
        &self.deltas
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.deltas.add_pan(dx, dy);
        self.dirty = true;
    }

    pub fn wheel(&mut self, notches: f32, pointer: Point) {
        self.deltas.add_wheel(notches, pointer);
        self.dirty = true;
    }

    /// Fit `target` (world coordinates) into the viewport. Deferred until the
    /// viewport is known when it is still empty.
    pub fn zoom_to_fit(&mut self, target: &Rect) -> bool {
        match ViewTransform::fit(target, &self.viewport, self.config.fit_margin) {
            Some(t) => {
                self.transform = t;
                self.dirty = true;
                true
            }
            None => {
                if self.viewport.width() <= 0.0 || self.viewport.height() <= 0.0 {
                    self.pending_fit = Some(*target);
                }
                false
            }
        }
    }

    /// Called when the element list is replaced.
    pub fn reset_frame(&mut self, elements: &[RenderElement]) {
        debug_assert!(
            check_preorder(elements).is_ok(),
            "element list is not in pre-order: {:?}",
            check_preorder(elements)
        );
        self.rendered = RenderedGeometry::default();
        self.dirty = true;
    }

    /// Fold pending pan/zoom input into the transform.
    pub fn apply_input(&mut self) {
        self.deltas.apply(&mut self.transform, &self.config);
    }

    /// Render only when something changed since the last frame.
    pub fn render_if_dirty(
        &mut self,
        elements: &[RenderElement],
        canvas: &mut dyn Canvas,
        styles: &dyn StyleLookup,
    ) -> bool {
        if !self.dirty {
            return false;
        }
        self.render(elements, canvas, styles);
        true
    }

    /// One render tick. Input is applied before any drawing so an aborted
    /// draw pass never leaves deltas behind; the recorded geometry is only
    /// replaced once the pass completes.
    pub fn render(
        &mut self,
        elements: &[RenderElement],
        canvas: &mut dyn Canvas,
        styles: &dyn StyleLookup,
    ) {
        self.apply_input();
        self.dirty = false;
        let frame = self.draw(elements, canvas, styles);
        self.rendered = frame;
    }

    fn draw(
        &self,
        elements: &[RenderElement],
        canvas: &mut dyn Canvas,
        styles: &dyn StyleLookup,
    ) -> RenderedGeometry {
        let cfg = &self.config;
        let t = &self.transform;
        let vp = &self.viewport;
        let mut frame = RenderedGeometry::default();

        // Signed: a culled node at depth 0 leaves no visible ancestor at all.
        let mut last_visible_depth: i64 = 0;
        let mut prev_node_in_view = true;

        for (i, e) in elements.iter().enumerate() {
            let depth = i64::from(e.depth);
            if e.kind == ElementKind::Node {
                if depth > last_visible_depth + 1 {
                    prev_node_in_view = false;
                    continue;
                }
                let r = t.rect_to_screen(&e.rect());
                if r.width() > cfg.min_node_size
                    && r.height() > cfg.min_node_size
                    && r.is_visible_in(vp)
                {
                    canvas.rect(r, &styles.style(e));
                    frame.nodes.push(Rendered { element: i, shape: r });
                    last_visible_depth = depth;
                    prev_node_in_view = true;
                } else {
                    last_visible_depth = depth - 1;
                    prev_node_in_view = false;
                }
                continue;
            }

            let slack = if e.kind == ElementKind::Edge { 1 } else { 2 };
            if !prev_node_in_view || depth > last_visible_depth + slack {
                continue;
            }

            match e.kind {
                ElementKind::Edge => self.draw_edge(i, e, canvas, styles, &mut frame),
                ElementKind::Label => {
                    let r = t.rect_to_screen(&e.rect());
                    if r.height() >= cfg.min_label_size && r.is_visible_in(vp) {
                        let pos = Point::new(r.left() + cfg.label_margin * t.scale, r.top());
                        canvas.text(pos, &e.text, e.font_size * t.scale, &styles.style(e));
                        frame.labels.push(Rendered { element: i, shape: r });
                    }
                }
                ElementKind::Port => {
                    let r = t.rect_to_screen(&e.rect());
                    if r.width().max(r.height()) >= cfg.min_port_size && r.is_visible_in(vp) {
                        canvas.rect(r, &styles.style(e));
                        frame.ports.push(Rendered { element: i, shape: r });
                    }
                }
                ElementKind::Junction => {
                    let r = t.rect_to_screen(&e.rect());
                    let c = Circle::new(r.center(), r.width() * 0.5);
                    if r.width() >= cfg.min_junction_size && c.bounding_rect().is_visible_in(vp) {
                        canvas.circle(c, &styles.style(e));
                        frame.junctions.push(Rendered { element: i, shape: c });
                    }
                }
                ElementKind::Node => {}
            }
        }
        frame
    }

    fn draw_edge(
        &self,
        i: usize,
        e: &RenderElement,
        canvas: &mut dyn Canvas,
        styles: &dyn StyleLookup,
        frame: &mut RenderedGeometry,
    ) {
        let t = &self.transform;
        let style = styles.style(e);
        let mut highlight = styles.highlight();
        highlight.width = self.config.highlight_width;
        for (j, pair) in e.points.windows(2).enumerate() {
            let segment = Segment::new(t.to_screen(pair[0]), t.to_screen(pair[1]));
            if segment.length_sq() < self.config.min_segment_len_sq {
                continue;
            }
            if !segment.is_visible_in(&self.viewport) {
                continue;
            }
            let arrow = e.is_arrow_segment(j);
            canvas.line(segment, &style);
            if e.highlighted && !arrow {
                canvas.line(segment, &highlight);
            }
            frame.edges.push(Rendered {
                element: i,
                shape: RenderedSegment { segment, arrow },
            });
        }
    }
}
