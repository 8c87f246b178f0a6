use crate::foundation::core::Canvas;
use crate::foundation::error::{StarmapError, StarmapResult};
use serde::{Deserialize, Serialize};

/// Printed poster format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosterSize {
    /// 12" × 16".
    S,
    /// 16" × 20".
    #[default]
    M,
    /// 20" × 24".
    L,
    /// 24" × 30".
    XL,
}

/// Physical dimensions of a [`PosterSize`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PosterDims {
    /// Width in inches.
    pub width_in: u32,
    /// Height in inches.
    pub height_in: u32,
    /// Display label.
    pub label: &'static str,
}

impl PosterSize {
    /// All sizes, smallest first.
    pub const ALL: [PosterSize; 4] = [PosterSize::S, PosterSize::M, PosterSize::L, PosterSize::XL];

    /// Static dimension lookup.
    pub fn dims(self) -> PosterDims {
        match self {
            PosterSize::S => PosterDims {
                width_in: 12,
                height_in: 16,
                label: "12\" × 16\"",
            },
            PosterSize::M => PosterDims {
                width_in: 16,
                height_in: 20,
                label: "16\" × 20\"",
            },
            PosterSize::L => PosterDims {
                width_in: 20,
                height_in: 24,
                label: "20\" × 24\"",
            },
            PosterSize::XL => PosterDims {
                width_in: 24,
                height_in: 30,
                label: "24\" × 30\"",
            },
        }
    }

    /// List price in whole US dollars.
    pub fn price_usd(self) -> u32 {
        match self {
            PosterSize::S => 49,
            PosterSize::M => 79,
            PosterSize::L => 99,
            PosterSize::XL => 119,
        }
    }

    /// The size highlighted as the most popular choice.
    pub fn is_popular(self) -> bool {
        self == PosterSize::M
    }

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            PosterSize::S => "S",
            PosterSize::M => "M",
            PosterSize::L => "L",
            PosterSize::XL => "XL",
        }
    }

    /// Print raster for this size at `dpi`.
    pub fn print_canvas(self, dpi: u32) -> StarmapResult<Canvas> {
        if dpi == 0 {
            return Err(StarmapError::validation("print dpi must be > 0"));
        }
        let d = self.dims();
        let canvas = Canvas::new(d.width_in * dpi, d.height_in * dpi);
        if canvas.width > Canvas::MAX_DIM || canvas.height > Canvas::MAX_DIM {
            return Err(StarmapError::validation(format!(
                "print raster {}x{} exceeds {}px per side",
                canvas.width,
                canvas.height,
                Canvas::MAX_DIM
            )));
        }
        Ok(canvas)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/poster.rs"]
mod tests;
