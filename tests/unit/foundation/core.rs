use super::*;

#[test]
fn canvas_empty_when_any_side_is_zero() {
    assert!(Canvas::new(0, 10).is_empty());
    assert!(Canvas::new(10, 0).is_empty());
    assert!(!Canvas::square(1).is_empty());
}

#[test]
fn canvas_geometry_helpers() {
    let c = Canvas::new(200, 100);
    assert_eq!(c.min_side(), 100.0);
    assert_eq!(c.center(), Point::new(100.0, 50.0));
    assert_eq!(c.rgba_len(), 200 * 100 * 4);
}

#[test]
fn canvas_rejects_dimensions_beyond_u16() {
    assert_eq!(Canvas::new(640, 480).to_u16().unwrap(), (640, 480));
    assert!(Canvas::new(70_000, 10).to_u16().is_err());
}

#[test]
fn premul_scales_color_channels() {
    let c = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(c.a, 128);
    assert_eq!(c.r, 128);
    assert_eq!(c.g, 64);
    assert_eq!(c.b, 0);
    assert_eq!(
        Rgba8Premul::from_straight_rgba(10, 20, 30, 255).to_array(),
        [10, 20, 30, 255]
    );
}
