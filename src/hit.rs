//! Pointer hit-testing against the geometry recorded by the last frame.
//!
//! Each per-kind list is in draw order, which follows the element list
//! (ancestors first), so the last match in a list is the most specific one.
//! Across kinds the precedence is Edge > Junction > Label > Port > Node.

use crate::geometry::Point;
use crate::model::{ElementKind, RenderElement};
use crate::render::{Rendered, RenderedGeometry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub kind: ElementKind,
    /// Index into the element list.
    pub index: usize,
}

fn last_match<T>(list: &[Rendered<T>], hit: impl Fn(&T) -> bool) -> Option<usize> {
    list.iter().rev().find(|r| hit(&r.shape)).map(|r| r.element)
}

impl RenderedGeometry {
    /// Topmost element under `p`, if any. Edge segments are hit within
    /// `edge_tolerance` screen pixels.
    pub fn hit_test(&self, p: Point, edge_tolerance: f32) -> Option<Hit> {
        let tol_sq = edge_tolerance * edge_tolerance;
        let found = [
            (
                ElementKind::Edge,
                last_match(&self.edges, |s| s.segment.distance_sq_to(p) <= tol_sq),
            ),
            (ElementKind::Junction, last_match(&self.junctions, |c| c.contains(p))),
            (ElementKind::Label, last_match(&self.labels, |r| r.contains(p))),
            (ElementKind::Port, last_match(&self.ports, |r| r.contains(p))),
            (ElementKind::Node, last_match(&self.nodes, |r| r.contains(p))),
        ];
        found
            .into_iter()
            .find_map(|(kind, index)| index.map(|index| Hit { kind, index }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapResult {
    /// Nothing drawn under the pointer.
    Miss,
    /// An edge was hit and its highlight toggled to `highlighted`.
    EdgeHighlight { index: usize, highlighted: bool },
    /// A non-edge element was hit.
    Element(Hit),
}

/// Hit-test `p` and apply the edge-highlight side effect. Highlighting one
/// edge clears it on every other edge.
pub fn resolve_tap(
    elements: &mut [RenderElement],
    rendered: &RenderedGeometry,
    p: Point,
    edge_tolerance: f32,
) -> TapResult {
    let Some(hit) = rendered.hit_test(p, edge_tolerance) else {
        return TapResult::Miss;
    };
    if hit.kind != ElementKind::Edge {
        return TapResult::Element(hit);
    }
    let Some(target) = elements.get(hit.index) else {
        return TapResult::Miss;
    };
    let highlighted = !target.highlighted;
    for (i, e) in elements.iter_mut().enumerate() {
        if i == hit.index {
            e.highlighted = highlighted;
        } else if e.highlighted {
            e.highlighted = false;
        }
    }
    TapResult::EdgeHighlight {
        index: hit.index,
        highlighted,
    }
}
