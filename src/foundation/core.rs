use crate::foundation::error::{StarmapError, StarmapResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Destination raster dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Upper bound for either side; the CPU rasterizer addresses pixels with `u16`.
    pub const MAX_DIM: u32 = u16::MAX as u32;

    /// Create a canvas without validation. Zero sizes are allowed and mean "skip".
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Square canvas of `side` pixels.
    pub fn square(side: u32) -> Self {
        Self::new(side, side)
    }

    /// `true` if either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Smaller of the two dimensions, as `f64`.
    pub fn min_side(self) -> f64 {
        f64::from(self.width.min(self.height))
    }

    /// Geometric center.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// Number of bytes of a tightly packed RGBA8 buffer of this size.
    pub fn rgba_len(self) -> usize {
        self.width as usize * self.height as usize * 4
    }

    /// Return `(width, height)` as `u16`, failing for oversized canvases.
    pub fn to_u16(self) -> StarmapResult<(u16, u16)> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| StarmapError::render("canvas width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| StarmapError::render("canvas height exceeds u16"))?;
        Ok((w, h))
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Byte array in RGBA order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
