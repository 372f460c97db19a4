#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn point_distance() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(3.0, 4.0);
    assert_eq!(a.distance_to(b), 5.0);
    assert_eq!(b.distance_to(a), 5.0);
}

#[test]
fn rect_edges_and_center() {
    let r = Rect::new(10.0, 20.0, 100.0, 50.0);
    assert_eq!(r.right(), 110.0);
    assert_eq!(r.bottom(), 70.0);
    assert_eq!(r.center(), Point::new(60.0, 45.0));
}

#[test]
fn rect_contains_is_edge_inclusive() {
    let r = Rect::new(0.0, 0.0, 100.0, 50.0);
    assert!(r.contains(Point::new(0.0, 0.0)));
    assert!(r.contains(Point::new(100.0, 50.0)));
    assert!(r.contains(Point::new(50.0, 25.0)));
    assert!(!r.contains(Point::new(100.1, 25.0)));
    assert!(!r.contains(Point::new(50.0, -0.1)));
}

#[test]
fn overlaps_x_range_strict_at_both_ends() {
    let r = Rect::new(100.0, 0.0, 50.0, 50.0);
    assert!(r.overlaps_x_range(0.0, 200.0));
    assert!(r.overlaps_x_range(149.0, 200.0));
    // Touching at the edges is not overlap.
    assert!(!r.overlaps_x_range(150.0, 200.0));
    assert!(!r.overlaps_x_range(0.0, 100.0));
}
