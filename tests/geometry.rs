use netlistview::geometry::{Circle, Point, Rect, Segment};

fn vp() -> Rect {
    Rect::from_xywh(0.0, 0.0, 100.0, 100.0)
}

#[test]
fn rect_visibility_uses_inclusive_bounds() {
    assert!(Rect::from_xywh(10.0, 10.0, 5.0, 5.0).is_visible_in(&vp()));
    // Touching the right edge still counts.
    assert!(Rect::from_xywh(100.0, 50.0, 10.0, 10.0).is_visible_in(&vp()));
    assert!(!Rect::from_xywh(101.0, 50.0, 10.0, 10.0).is_visible_in(&vp()));
    assert!(!Rect::from_xywh(-20.0, -20.0, 10.0, 10.0).is_visible_in(&vp()));
}

#[test]
fn rect_larger_than_viewport_is_visible() {
    let big = Rect::from_xywh(-500.0, -500.0, 2000.0, 2000.0);
    assert!(big.contains_rect(&vp()));
    assert!(big.is_visible_in(&vp()));
}

#[test]
fn rect_union_and_center() {
    let a = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
    let b = Rect::from_xywh(20.0, 5.0, 10.0, 30.0);
    let u = a.union(&b);
    assert_eq!(u, Rect::from_xywh(0.0, 0.0, 30.0, 35.0));
    assert_eq!(u.center(), Point::new(15.0, 17.5));
}

#[test]
fn segment_crossing_viewport_without_endpoints_inside() {
    let diag = Segment::new(Point::new(-20.0, 50.0), Point::new(50.0, 120.0));
    // Cuts off the lower-left corner.
    assert!(diag.is_visible_in(&vp()));

    let through = Segment::new(Point::new(-10.0, -5.0), Point::new(110.0, 105.0));
    assert!(!vp().contains(through.a) && !vp().contains(through.b));
    assert!(through.is_visible_in(&vp()));

    let miss = Segment::new(Point::new(-10.0, 200.0), Point::new(200.0, 120.0));
    assert!(!miss.is_visible_in(&vp()));
}

#[test]
fn axis_aligned_segments_use_interval_overlap() {
    let v = Segment::new(Point::new(50.0, -100.0), Point::new(50.0, 300.0));
    assert!(v.is_vertical());
    assert!(v.is_visible_in(&vp()));

    let h = Segment::new(Point::new(-100.0, 120.0), Point::new(300.0, 120.0));
    assert!(h.is_horizontal());
    assert!(!h.is_visible_in(&vp()));
}

#[test]
fn segment_intersection_cases() {
    let a = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
    let b = Segment::new(Point::new(0.0, 10.0), Point::new(10.0, 0.0));
    assert!(a.intersects_segment(&b));

    let parallel = Segment::new(Point::new(0.0, 1.0), Point::new(10.0, 11.0));
    assert!(!a.intersects_segment(&parallel));

    let collinear = Segment::new(Point::new(5.0, 5.0), Point::new(20.0, 20.0));
    assert!(a.intersects_segment(&collinear));

    let disjoint = Segment::new(Point::new(11.0, 11.0), Point::new(20.0, 20.0));
    assert!(!a.intersects_segment(&disjoint));
}

#[test]
fn segment_distance() {
    let s = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
    assert_eq!(s.distance_sq_to(Point::new(5.0, 3.0)), 9.0);
    // Beyond the end the distance is to the endpoint.
    assert_eq!(s.distance_sq_to(Point::new(13.0, 4.0)), 25.0);

    let dot = Segment::new(Point::new(1.0, 1.0), Point::new(1.0, 1.0));
    assert_eq!(dot.distance_sq_to(Point::new(4.0, 5.0)), 25.0);
}

#[test]
fn circle_contains_and_bounds() {
    let c = Circle::new(Point::new(10.0, 10.0), 2.0);
    assert!(c.contains(Point::new(11.0, 11.0)));
    assert!(!c.contains(Point::new(12.0, 12.0)));
    assert_eq!(c.bounding_rect(), Rect::from_xywh(8.0, 8.0, 4.0, 4.0));
}
