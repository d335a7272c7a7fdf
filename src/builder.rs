//! Graph builder: flattens a nested layout document into render elements.
//!
//! The traversal is depth-first pre-order. For every node the builder emits
//! the node itself, then its labels, ports and edges, and only then recurses
//! into its children. The renderer depends on this order: an element's owning
//! node is always the most recently emitted node at a lower depth.
//!
//! Positions in the document are relative to the containing node. The builder
//! accumulates them into absolute canvas positions:
//! `absolute = reference + local * scale`.

use crate::config::BuildConfig;
use crate::error::OrderViolation;
use crate::geometry::{Point, Rect};
use crate::model::{
    EdgeSection, ElementKind, LayoutEdge, LayoutLabel, LayoutNode, LayoutPort, OPT_FONT_SIZE,
    OPT_INDEX_IN_SIGNAL, OPT_LOCATION_PATH, OPT_SIGNAL_NAME, OPT_SIGNAL_TYPE, OPT_SRC_LOCATION,
    RenderElement, option_integer, option_string,
};
use crate::navigation::parent_path;

#[derive(Debug, Clone, Copy)]
pub struct BuildOptions<'a> {
    pub x_ref: f32,
    pub y_ref: f32,
    pub scale: f32,
    /// Hierarchy path of the last tapped node, or empty.
    pub clicked_path: &'a str,
}

impl Default for BuildOptions<'_> {
    fn default() -> Self {
        Self {
            x_ref: 0.0,
            y_ref: 0.0,
            scale: 1.0,
            clicked_path: "",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BuildOutput {
    pub elements: Vec<RenderElement>,
    pub max_width: f32,
    pub max_height: f32,
    /// Rectangle of the node whose path equals the clicked path.
    pub clicked_rect: Option<Rect>,
    /// Rectangle of the clicked node's parent, or the whole diagram when the
    /// clicked node sits at the top level.
    pub clicked_parent_rect: Option<Rect>,
    /// Total characters over all label texts.
    pub char_count: usize,
}

impl BuildOutput {
    pub fn count(&self, kind: ElementKind) -> usize {
        self.elements.iter().filter(|e| e.kind == kind).count()
    }
}

pub struct GraphBuilder<'c> {
    config: &'c BuildConfig,
}

/// Mutable state of one build, passed explicitly through the recursion.
struct BuildContext<'a> {
    scale: f32,
    clicked: &'a str,
    clicked_parent: &'a str,
    seen_top_level: bool,
    out: BuildOutput,
}

impl<'c> GraphBuilder<'c> {
    pub fn new(config: &'c BuildConfig) -> Self {
        Self { config }
    }

    pub fn build(&self, root: &LayoutNode, opts: &BuildOptions<'_>) -> BuildOutput {
        let mut ctx = BuildContext {
            scale: opts.scale,
            clicked: opts.clicked_path,
            clicked_parent: parent_path(opts.clicked_path),
            seen_top_level: false,
            out: BuildOutput::default(),
        };
        self.visit_node(&mut ctx, root, Point::new(opts.x_ref, opts.y_ref), 0);

        if !ctx.clicked.is_empty() && ctx.out.clicked_parent_rect.is_none() && ctx.seen_top_level
        {
            // Top-level nodes have no addressable parent; zoom out to everything.
            ctx.out.clicked_parent_rect = Some(Rect::from_min_max(
                Point::new(opts.x_ref, opts.y_ref),
                Point::new(ctx.out.max_width, ctx.out.max_height),
            ));
        }

        log::debug!(
            "built {} elements, extents {}x{}, {} label chars",
            ctx.out.elements.len(),
            ctx.out.max_width,
            ctx.out.max_height,
            ctx.out.char_count
        );
        ctx.out
    }

    fn visit_node(&self, ctx: &mut BuildContext<'_>, node: &LayoutNode, reference: Point, depth: u32) {
        let s = ctx.scale;
        let pos = Point::new(reference.x + node.x * s, reference.y + node.y * s);
        let (w, h) = (node.width * s, node.height * s);

        ctx.out.max_width = ctx.out.max_width.max(pos.x + w);
        ctx.out.max_height = ctx.out.max_height.max(pos.y + h);

        if !node.is_root() {
            let opts = &node.layout_options;
            let path = opts.location_path();
            if !path.is_empty() {
                let rect = Rect::from_xywh(pos.x, pos.y, w, h);
                if path == ctx.clicked {
                    ctx.out.clicked_rect = Some(rect);
                }
                if !ctx.clicked_parent.is_empty() && path == ctx.clicked_parent {
                    ctx.out.clicked_parent_rect = Some(rect);
                }
            }
            if depth == 1 {
                ctx.seen_top_level = true;
            }
            ctx.out.elements.push(RenderElement {
                kind: ElementKind::Node,
                x: pos.x,
                y: pos.y,
                width: w,
                height: h,
                depth,
                source_location: opts.src_location(),
                hierarchy_path: path,
                cell_name: opts.cell_name(),
                cell_type: opts.cell_type(),
                ..Default::default()
            });
        }

        for label in &node.labels {
            self.visit_label(ctx, label, pos, depth + 1);
        }
        for port in &node.ports {
            self.visit_port(ctx, port, pos, depth + 1);
        }
        for edge in &node.edges {
            self.visit_edge(ctx, edge, pos, depth + 1);
        }
        for child in &node.children {
            self.visit_node(ctx, child, pos, depth + 1);
        }
    }

    fn visit_label(&self, ctx: &mut BuildContext<'_>, label: &LayoutLabel, reference: Point, depth: u32) {
        let s = ctx.scale;
        let font_size = label
            .layout_options
            .number(OPT_FONT_SIZE)
            .unwrap_or(self.config.default_font_size);
        ctx.out.char_count += label.text.chars().count();
        ctx.out.elements.push(RenderElement {
            kind: ElementKind::Label,
            x: reference.x + label.x * s,
            y: reference.y + label.y * s,
            width: label.width * s,
            height: label.height * s,
            depth,
            text: label.text.clone(),
            font_size: font_size * s,
            ..Default::default()
        });
    }

    fn visit_port(&self, ctx: &mut BuildContext<'_>, port: &LayoutPort, reference: Point, depth: u32) {
        let s = ctx.scale;
        let pos = Point::new(reference.x + port.x * s, reference.y + port.y * s);
        ctx.out.elements.push(RenderElement {
            kind: ElementKind::Port,
            x: pos.x,
            y: pos.y,
            width: port.width * s,
            height: port.height * s,
            depth,
            ..Default::default()
        });
        for label in &port.labels {
            self.visit_label(ctx, label, pos, depth + 1);
        }
    }

    fn visit_edge(&self, ctx: &mut BuildContext<'_>, edge: &LayoutEdge, reference: Point, depth: u32) {
        for section in &edge.sections {
            let points = self.section_points(section, reference, ctx.scale);
            let bounds = bounding_rect(&points);
            let (primary, fallback) = (&section.layout_options, &edge.layout_options);
            ctx.out.elements.push(RenderElement {
                kind: ElementKind::Edge,
                x: bounds.left(),
                y: bounds.top(),
                width: bounds.width(),
                height: bounds.height(),
                depth,
                points,
                source_location: option_string(primary, fallback, OPT_SRC_LOCATION),
                hierarchy_path: option_string(primary, fallback, OPT_LOCATION_PATH),
                signal_name: option_string(primary, fallback, OPT_SIGNAL_NAME),
                signal_type: option_string(primary, fallback, OPT_SIGNAL_TYPE),
                index_in_signal: option_integer(primary, fallback, OPT_INDEX_IN_SIGNAL),
                ..Default::default()
            });
        }
        for label in &edge.labels {
            self.visit_label(ctx, label, reference, depth + 1);
        }
        let size = self.config.junction_size * ctx.scale;
        for jp in &edge.junction_points {
            let cx = reference.x + jp.x * ctx.scale;
            let cy = reference.y + jp.y * ctx.scale;
            ctx.out.elements.push(RenderElement {
                kind: ElementKind::Junction,
                x: cx - size * 0.5,
                y: cy - size * 0.5,
                width: size,
                height: size,
                depth: depth + 1,
                ..Default::default()
            });
        }
    }

    /// Start, bend points, end, then the arrowhead: wing, end, wing.
    fn section_points(&self, section: &EdgeSection, reference: Point, scale: f32) -> Vec<Point> {
        let abs = |x: f32, y: f32| Point::new(reference.x + x * scale, reference.y + y * scale);
        let mut points = Vec::with_capacity(section.bend_points.len() + 5);
        points.push(abs(section.start_point.x, section.start_point.y));
        points.extend(section.bend_points.iter().map(|p| abs(p.x, p.y)));
        let end = abs(section.end_point.x, section.end_point.y);
        let prev = *points.last().unwrap_or(&end);
        points.push(end);

        let (wing_a, wing_b) = arrowhead(
            prev,
            end,
            self.config.arrow_length * scale,
            self.config.arrow_angle_deg.to_radians(),
        );
        points.extend([wing_a, end, wing_b]);
        points
    }
}

/// Wing points of an arrowhead pointing from `from` to `tip`.
///
/// A zero-length direction yields a collapsed arrowhead (both wings at the
/// tip) instead of NaN coordinates.
pub fn arrowhead(from: Point, tip: Point, length: f32, angle: f32) -> (Point, Point) {
    let (dx, dy) = (tip.x - from.x, tip.y - from.y);
    let mag = (dx * dx + dy * dy).sqrt();
    if !mag.is_finite() || mag <= f32::EPSILON {
        return (tip, tip);
    }
    // Unit vector pointing back along the edge.
    let (bx, by) = (-dx / mag, -dy / mag);
    let (sin, cos) = angle.sin_cos();
    let wing = |sin: f32| {
        Point::new(
            tip.x + (bx * cos - by * sin) * length,
            tip.y + (bx * sin + by * cos) * length,
        )
    };
    (wing(sin), wing(-sin))
}

fn bounding_rect(points: &[Point]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::default();
    };
    points.iter().skip(1).fold(
        Rect::from_min_max(*first, *first),
        |r, p| Rect::from_min_max(
            Point::new(r.min.x.min(p.x), r.min.y.min(p.y)),
            Point::new(r.max.x.max(p.x), r.max.y.max(p.y)),
        ),
    )
}

/// Verify that `elements` is in depth-first pre-order as produced by
/// [`GraphBuilder::build`]: a node is at most one level below the previous
/// node, any other element at most two levels below it.
pub fn check_preorder(elements: &[RenderElement]) -> Result<(), OrderViolation> {
    let mut last_node_depth = 0u32;
    for (index, e) in elements.iter().enumerate() {
        let allowed = match e.kind {
            ElementKind::Node => last_node_depth + 1,
            _ => last_node_depth + 2,
        };
        if e.depth > allowed {
            return Err(OrderViolation {
                index,
                kind: e.kind,
                depth: e.depth,
                allowed,
            });
        }
        if e.kind == ElementKind::Node {
            last_node_depth = e.depth;
        }
    }
    Ok(())
}
