use kurbo::Shape as _;

use crate::config::theme::ShapeMask;
use crate::foundation::core::{BezPath, Canvas, Point};

/// Disc radius as a fraction of the shorter canvas side.
pub const CIRCLE_RADIUS_FRAC: f64 = 0.45;
/// Heart size as a fraction of the shorter canvas side.
pub const HEART_SIZE_FRAC: f64 = 0.35;

const CURVE_TOLERANCE: f64 = 0.1;

/// Clip outline for `shape` on `canvas`, `None` for [`ShapeMask::Plain`].
pub fn mask_path(shape: ShapeMask, canvas: Canvas) -> Option<BezPath> {
    match shape {
        ShapeMask::Plain => None,
        ShapeMask::Circle => Some(circle_path(canvas)),
        ShapeMask::Heart => Some(heart_path(canvas)),
    }
}

/// Disc centered on `canvas`.
pub fn circle_path(canvas: Canvas) -> BezPath {
    let r = canvas.min_side() * CIRCLE_RADIUS_FRAC;
    kurbo::Circle::new(canvas.center(), r).to_path(CURVE_TOLERANCE)
}

/// Heart centered on `canvas`.
///
/// Four cubic segments starting and ending at the bottom tip of the inner notch.
pub fn heart_path(canvas: Canvas) -> BezPath {
    let c = canvas.center();
    let s = canvas.min_side() * HEART_SIZE_FRAC;
    let p = |dx: f64, dy: f64| Point::new(c.x + s * dx, c.y + s * dy);

    let mut path = BezPath::new();
    path.move_to(p(0.0, 0.4));
    path.curve_to(p(0.0, 0.0), p(-0.35, -0.1), p(-0.35, 0.15));
    path.curve_to(p(-0.35, 0.5), p(0.0, 0.6), p(0.0, 0.6));
    path.curve_to(p(0.0, 0.6), p(0.35, 0.5), p(0.35, 0.15));
    path.curve_to(p(0.35, -0.1), p(0.0, 0.0), p(0.0, 0.4));
    path.close_path();
    path
}

#[cfg(test)]
#[path = "../../tests/unit/compose/mask.rs"]
mod tests;
