//! Backend-agnostic list of paint operations for one poster.
//!
//! The plan is derived from the config and canvas alone. Executing it needs the sky
//! chart and, for text, a font; see [`crate::compose::cpu`].

use crate::compose::mask;
use crate::config::model::DesignerConfig;
use crate::config::moment;
use crate::config::theme::ShapeMask;
use crate::foundation::color::HexColor;
use crate::foundation::core::{BezPath, Canvas, Point, Rect};

/// Font sizes and anchor offsets of the text overlays, in px.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextLayoutOpts {
    /// Title size (bold).
    pub title_px: f32,
    /// Distance of the title center from the top edge.
    pub title_y: f64,
    /// Caption size.
    pub caption_px: f32,
    /// Caption center below the canvas middle, as a fraction of the height.
    pub caption_offset_frac: f64,
    /// Caption opacity.
    pub caption_opacity: f32,
    /// Footnote size.
    pub footnote_px: f32,
    /// Distance of the footnote center from the bottom edge.
    pub footnote_inset: f64,
    /// Footnote opacity.
    pub footnote_opacity: f32,
}

impl Default for TextLayoutOpts {
    fn default() -> Self {
        Self {
            title_px: 24.0,
            title_y: 40.0,
            caption_px: 14.0,
            caption_offset_frac: 0.35,
            caption_opacity: 0.9,
            footnote_px: 12.0,
            footnote_inset: 40.0,
            footnote_opacity: 0.8,
        }
    }
}

/// Which overlay a text op draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextRole {
    /// Headline at the top.
    Title,
    /// Long date and time.
    Caption,
    /// Bottom line.
    Footnote,
}

/// One text overlay, centered on `center` both ways.
#[derive(Clone, Debug, PartialEq)]
pub struct TextOp {
    /// Overlay kind.
    pub role: TextRole,
    /// Text to draw.
    pub text: String,
    /// Anchor.
    pub center: Point,
    /// Font size.
    pub size_px: f32,
    /// Bold weight.
    pub bold: bool,
    /// Fill color.
    pub color: HexColor,
    /// Layer opacity.
    pub opacity: f32,
}

/// A single compositing step.
#[derive(Clone, Debug, PartialEq)]
pub enum PaintOp {
    /// Cover the whole canvas with a solid color.
    Fill(HexColor),
    /// Draw the sky chart stretched to the canvas.
    Chart,
    /// Destination-in with the filled `path`.
    Mask {
        /// Shape that produced the path.
        shape: ShapeMask,
        /// Clip outline in canvas px.
        path: BezPath,
    },
    /// Text overlay.
    Text(TextOp),
    /// Rectangle outline with miter joins.
    StrokeRect {
        /// Stroke center line.
        rect: Rect,
        /// Line width in px.
        width: f64,
        /// Stroke color.
        color: HexColor,
    },
}

/// Ordered paint operations for one canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositePlan {
    /// Destination size.
    pub canvas: Canvas,
    /// Operations in paint order.
    pub ops: Vec<PaintOp>,
}

impl CompositePlan {
    /// Text ops in paint order.
    pub fn text_ops(&self) -> impl Iterator<Item = &TextOp> {
        self.ops.iter().filter_map(|op| match op {
            PaintOp::Text(t) => Some(t),
            _ => None,
        })
    }

    /// Whether the plan paints anything.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Same plan without the chart op, used while no chart is available.
    pub fn without_chart(mut self) -> Self {
        self.ops.retain(|op| !matches!(op, PaintOp::Chart));
        self
    }
}

/// Compile the paint operations for `config` on `canvas`.
///
/// An empty canvas yields an empty plan.
pub fn compile_plan(config: &DesignerConfig, canvas: Canvas, text: &TextLayoutOpts) -> CompositePlan {
    let mut ops = Vec::new();
    if canvas.is_empty() {
        return CompositePlan { canvas, ops };
    }

    let pal = config.color_theme.palette();
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);
    let cx = w / 2.0;

    ops.push(PaintOp::Fill(pal.bg));
    ops.push(PaintOp::Chart);

    if let Some(path) = mask::mask_path(config.shape_mask, canvas) {
        ops.push(PaintOp::Mask {
            shape: config.shape_mask,
            path,
        });
    }

    if !config.title.is_empty() {
        ops.push(PaintOp::Text(TextOp {
            role: TextRole::Title,
            text: config.title.clone(),
            center: Point::new(cx, text.title_y),
            size_px: text.title_px,
            bold: true,
            color: pal.fg,
            opacity: 1.0,
        }));
    }

    ops.push(PaintOp::Text(TextOp {
        role: TextRole::Caption,
        text: moment::caption(&config.date, &config.time),
        center: Point::new(cx, h / 2.0 + h * text.caption_offset_frac),
        size_px: text.caption_px,
        bold: false,
        color: pal.fg,
        opacity: text.caption_opacity,
    }));

    if !config.footnote.is_empty() {
        ops.push(PaintOp::Text(TextOp {
            role: TextRole::Footnote,
            text: config.footnote.clone(),
            center: Point::new(cx, h - text.footnote_inset),
            size_px: text.footnote_px,
            bold: false,
            color: pal.fg,
            opacity: text.footnote_opacity,
        }));
    }

    if config.show_frame {
        ops.push(PaintOp::StrokeRect {
            rect: Rect::new(4.0, 4.0, w - 4.0, h - 4.0),
            width: 8.0,
            color: pal.fg,
        });
        ops.push(PaintOp::StrokeRect {
            rect: Rect::new(6.0, 6.0, w - 6.0, h - 6.0),
            width: 2.0,
            color: pal.bg,
        });
    }

    CompositePlan { canvas, ops }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/plan.rs"]
mod tests;
