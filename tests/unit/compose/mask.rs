use super::*;
use kurbo::Shape;

#[test]
fn plain_has_no_mask() {
    assert!(mask_path(ShapeMask::Plain, Canvas::square(100)).is_none());
}

#[test]
fn circle_uses_shorter_side() {
    let path = circle_path(Canvas::new(200, 100));
    let bb = path.bounding_box();
    assert!((bb.width() - 90.0).abs() < 0.5);
    assert!((bb.center().x - 100.0).abs() < 1e-6);
    assert!(path.contains(Point::new(100.0, 50.0)));
    assert!(!path.contains(Point::new(1.0, 1.0)));
}

#[test]
fn heart_is_four_cubics_around_the_notch() {
    let path = heart_path(Canvas::square(100));
    let curves = path
        .elements()
        .iter()
        .filter(|e| matches!(e, kurbo::PathEl::CurveTo(..)))
        .count();
    assert_eq!(curves, 4);

    let s = 35.0;
    assert!(path.contains(Point::new(50.0, 50.0 + 0.5 * s)));
    assert!(!path.contains(Point::new(50.0, 40.0)));
    assert!(!path.contains(Point::new(50.0, 50.0 + 0.7 * s)));

    let bb = path.bounding_box();
    assert!((bb.x0 - (50.0 - 0.35 * s)).abs() < 1e-6);
    assert!((bb.x1 - (50.0 + 0.35 * s)).abs() < 1e-6);
    assert!((bb.y1 - (50.0 + 0.6 * s)).abs() < 1e-6);
}
