use netlistview::builder::{BuildOptions, GraphBuilder};
use netlistview::config::{BuildConfig, RenderConfig};
use netlistview::geometry::{Circle, Point, Rect, Segment};
use netlistview::hit::{Hit, TapResult, resolve_tap};
use netlistview::model::{ElementKind, LayoutNode, RenderElement};
use netlistview::render::{Canvas, DefaultStyle, DiagramRenderer, RenderedGeometry, Style};
use serde_json::json;

struct NullCanvas;

impl Canvas for NullCanvas {
    fn rect(&mut self, _: Rect, _: &Style) {}
    fn line(&mut self, _: Segment, _: &Style) {}
    fn circle(&mut self, _: Circle, _: &Style) {}
    fn text(&mut self, _: Point, _: &str, _: f32, _: &Style) {}
}

const TOL: f32 = 3.0;

/// Elements: 0 node, 1 label, 2 label, 3 port, 4 edge, 5 edge, 6 junction, 7 child node.
fn scene() -> (Vec<RenderElement>, DiagramRenderer) {
    let doc = LayoutNode::from_json_str(
        &json!({
            "id": "root",
            "children": [{
                "id": "n1", "width": 200, "height": 200,
                "labels": [
                    { "text": "title", "x": 50, "y": 5, "width": 40, "height": 10 },
                    { "text": "j", "x": 90, "y": 145, "width": 20, "height": 10 }
                ],
                "ports": [{ "x": 0, "y": 20, "width": 10, "height": 10 }],
                "edges": [
                    {
                        "sections": [{ "startPoint": {"x": 20, "y": 100}, "endPoint": {"x": 180, "y": 100} }],
                        "junctionPoints": [{ "x": 100, "y": 150 }]
                    },
                    { "sections": [{ "startPoint": {"x": 20, "y": 60}, "endPoint": {"x": 180, "y": 60} }] }
                ],
                "children": [{ "id": "c", "x": 120, "y": 120, "width": 40, "height": 40 }]
            }]
        })
        .to_string(),
    )
    .expect("parse layout document");
    let els = GraphBuilder::new(&BuildConfig::default())
        .build(&doc, &BuildOptions::default())
        .elements;
    let mut r = DiagramRenderer::new(RenderConfig::default());
    r.set_viewport(Rect::from_xywh(0.0, 0.0, 800.0, 600.0));
    r.render(&els, &mut NullCanvas, &DefaultStyle);
    (els, r)
}

fn hit(kind: ElementKind, index: usize) -> Option<Hit> {
    Some(Hit { kind, index })
}

#[test]
fn scene_layout_is_as_expected() {
    let (els, _) = scene();
    let k: Vec<ElementKind> = els.iter().map(|e| e.kind).collect();
    use ElementKind::*;
    assert_eq!(k, vec![Node, Label, Label, Port, Edge, Edge, Junction, Node]);
}

#[test]
fn precedence_edge_junction_label_port_node() {
    let (_, r) = scene();
    let g = r.rendered();
    assert_eq!(g.hit_test(Point::new(100.0, 101.0), TOL), hit(ElementKind::Edge, 4));
    assert_eq!(g.hit_test(Point::new(100.0, 150.0), TOL), hit(ElementKind::Junction, 6));
    assert_eq!(g.hit_test(Point::new(95.0, 153.0), TOL), hit(ElementKind::Label, 2));
    assert_eq!(g.hit_test(Point::new(60.0, 10.0), TOL), hit(ElementKind::Label, 1));
    assert_eq!(g.hit_test(Point::new(5.0, 25.0), TOL), hit(ElementKind::Port, 3));
    assert_eq!(g.hit_test(Point::new(10.0, 180.0), TOL), hit(ElementKind::Node, 0));
}

#[test]
fn innermost_node_wins() {
    let (_, r) = scene();
    assert_eq!(
        r.rendered().hit_test(Point::new(130.0, 130.0), TOL),
        hit(ElementKind::Node, 7)
    );
}

#[test]
fn miss_outside_everything() {
    let (mut els, r) = scene();
    assert_eq!(r.rendered().hit_test(Point::new(500.0, 500.0), TOL), None);
    let before = els.clone();
    assert_eq!(
        resolve_tap(&mut els, r.rendered(), Point::new(500.0, 500.0), TOL),
        TapResult::Miss
    );
    assert_eq!(els, before);
}

#[test]
fn empty_frame_hits_nothing() {
    let (mut els, _) = scene();
    let empty = RenderedGeometry::default();
    assert!(empty.is_empty());
    assert_eq!(empty.hit_test(Point::new(100.0, 100.0), TOL), None);
    assert_eq!(
        resolve_tap(&mut els, &empty, Point::new(100.0, 100.0), TOL),
        TapResult::Miss
    );
    assert!(els.iter().all(|e| !e.highlighted));
}

#[test]
fn edge_tap_toggles_highlight_and_clears_others() {
    let (mut els, r) = scene();
    let g = r.rendered();

    let res = resolve_tap(&mut els, g, Point::new(50.0, 100.0), TOL);
    assert_eq!(res, TapResult::EdgeHighlight { index: 4, highlighted: true });
    assert!(els[4].highlighted);

    let res = resolve_tap(&mut els, g, Point::new(50.0, 60.0), TOL);
    assert_eq!(res, TapResult::EdgeHighlight { index: 5, highlighted: true });
    assert!(els[5].highlighted);
    assert!(!els[4].highlighted);

    let res = resolve_tap(&mut els, g, Point::new(50.0, 61.0), TOL);
    assert_eq!(res, TapResult::EdgeHighlight { index: 5, highlighted: false });
    assert!(els.iter().all(|e| !e.highlighted));
}

#[test]
fn non_edge_tap_leaves_highlight_alone() {
    let (mut els, r) = scene();
    let g = r.rendered();
    resolve_tap(&mut els, g, Point::new(50.0, 100.0), TOL);
    let res = resolve_tap(&mut els, g, Point::new(5.0, 25.0), TOL);
    assert_eq!(res, TapResult::Element(Hit { kind: ElementKind::Port, index: 3 }));
    assert!(els[4].highlighted);
}
