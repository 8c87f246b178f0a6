use std::sync::Arc;

use crate::compose::pixel::{dest_in_in_place, fill_in_place, over_in_place};
use crate::compose::plan::{CompositePlan, PaintOp, TextLayoutOpts, TextOp, compile_plan};
use crate::compose::raster::decode_chart;
use crate::compose::text::{
    FontSource, TextBrushRgba8, TextLayoutEngine, resolve_font, system_fontdb,
};
use crate::config::model::DesignerConfig;
use crate::foundation::core::{BezPath, Canvas, Rect};
use crate::foundation::error::{StarmapError, StarmapResult};
use crate::sky::renderer::SkyChart;

/// A composed poster as RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl RasterRGBA {
    /// Pixel at `(x, y)`, premultiplied.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Copy with straight (non-premultiplied) alpha, e.g. for PNG export.
    pub fn to_straight(&self) -> RasterRGBA {
        let mut data = self.data.clone();
        if self.premultiplied {
            for px in data.chunks_exact_mut(4) {
                let a = u16::from(px[3]);
                if a == 0 || a == 255 {
                    continue;
                }
                for c in &mut px[..3] {
                    *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
                }
            }
        }
        RasterRGBA {
            width: self.width,
            height: self.height,
            data,
            premultiplied: false,
        }
    }
}

/// Result of one compositor run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompositeOutcome {
    /// Nothing was painted (empty canvas).
    Skipped,
    /// Fresh raster.
    Composed(RasterRGBA),
}

impl CompositeOutcome {
    /// The raster, if one was produced.
    pub fn raster(&self) -> Option<&RasterRGBA> {
        match self {
            CompositeOutcome::Skipped => None,
            CompositeOutcome::Composed(r) => Some(r),
        }
    }

    /// Owned form of [`CompositeOutcome::raster`].
    pub fn into_raster(self) -> Option<RasterRGBA> {
        match self {
            CompositeOutcome::Skipped => None,
            CompositeOutcome::Composed(r) => Some(r),
        }
    }
}

/// Compositor options.
#[derive(Clone, Debug, Default)]
pub struct CompositorOpts {
    /// Font used for the overlays.
    pub font: FontSource,
    /// Overlay sizes and anchors.
    pub text: TextLayoutOpts,
}

enum FontState {
    Unresolved,
    Missing,
    Ready(Box<TextLayoutEngine>),
}

/// CPU compositor powered by `vello_cpu` for vector/text rasterization and `resvg`
/// for SVG charts.
pub struct CpuCompositor {
    opts: CompositorOpts,
    ctx: Option<vello_cpu::RenderContext>,
    fontdb: Option<Arc<usvg::fontdb::Database>>,
    font: FontState,
}

impl CpuCompositor {
    /// Compositor with `opts`. Fonts are resolved lazily on the first text op.
    pub fn new(opts: CompositorOpts) -> Self {
        Self {
            opts,
            ctx: None,
            fontdb: None,
            font: FontState::Unresolved,
        }
    }

    /// Options in use.
    pub fn opts(&self) -> &CompositorOpts {
        &self.opts
    }

    /// Whether overlay text can be drawn. Resolves the font if needed.
    pub fn has_font(&mut self) -> StarmapResult<bool> {
        Ok(self.text_engine()?.is_some())
    }

    /// Plan for `config` on `canvas` with this compositor's text options.
    pub fn plan(&self, config: &DesignerConfig, canvas: Canvas) -> CompositePlan {
        compile_plan(config, canvas, &self.opts.text)
    }

    /// Compose `chart` with `config` onto a fresh `canvas`-sized raster.
    ///
    /// A chart that cannot be decoded fails the whole run.
    #[tracing::instrument(skip_all, fields(w = canvas.width, h = canvas.height, chart = chart.kind()))]
    pub fn compose(
        &mut self,
        chart: &SkyChart,
        config: &DesignerConfig,
        canvas: Canvas,
    ) -> StarmapResult<CompositeOutcome> {
        let plan = self.plan(config, canvas);
        self.execute(&plan, Some(chart))
    }

    /// Neutral poster without a chart: background, mask, text, frame.
    pub fn compose_placeholder(
        &mut self,
        config: &DesignerConfig,
        canvas: Canvas,
    ) -> StarmapResult<CompositeOutcome> {
        let plan = self.plan(config, canvas).without_chart();
        self.execute(&plan, None)
    }

    /// Run `plan`. A `Chart` op with no chart given is skipped.
    pub fn execute(
        &mut self,
        plan: &CompositePlan,
        chart: Option<&SkyChart>,
    ) -> StarmapResult<CompositeOutcome> {
        if plan.canvas.is_empty() || plan.is_empty() {
            tracing::debug!("empty canvas; nothing to compose");
            return Ok(CompositeOutcome::Skipped);
        }
        let canvas = plan.canvas;
        let (w16, h16) = canvas.to_u16()?;
        let mut dst = vec![0u8; canvas.rgba_len()];

        for op in &plan.ops {
            match op {
                PaintOp::Fill(color) => fill_in_place(&mut dst, color.to_premul(1.0)),
                PaintOp::Chart => {
                    let Some(chart) = chart else {
                        continue;
                    };
                    let fontdb = self.fontdb();
                    let src = decode_chart(chart, canvas, Some(fontdb))?;
                    over_in_place(&mut dst, &src, 1.0)?;
                }
                PaintOp::Mask { path, .. } => {
                    let mask = self.fill_path_scratch(w16, h16, path)?;
                    dest_in_in_place(&mut dst, mask.data_as_u8_slice())?;
                }
                PaintOp::Text(t) => {
                    if let Some(layer) = self.text_scratch(w16, h16, t)? {
                        over_in_place(&mut dst, layer.data_as_u8_slice(), t.opacity)?;
                    }
                }
                PaintOp::StrokeRect { rect, width, color } => {
                    let layer = self.with_ctx(w16, h16, |ctx| {
                        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                            color.r, color.g, color.b, 255,
                        ));
                        ctx.set_stroke(
                            vello_cpu::kurbo::Stroke::new(*width)
                                .with_join(vello_cpu::kurbo::Join::Miter),
                        );
                        ctx.stroke_rect(&rect_to_cpu(*rect));
                    });
                    over_in_place(&mut dst, layer.data_as_u8_slice(), 1.0)?;
                }
            }
        }

        Ok(CompositeOutcome::Composed(RasterRGBA {
            width: canvas.width,
            height: canvas.height,
            data: dst,
            premultiplied: true,
        }))
    }

    fn fontdb(&mut self) -> Arc<usvg::fontdb::Database> {
        self.fontdb.get_or_insert_with(system_fontdb).clone()
    }

    fn text_engine(&mut self) -> StarmapResult<Option<&mut TextLayoutEngine>> {
        if let FontState::Unresolved = self.font {
            let source = self.opts.font.clone();
            let resolved = match source {
                FontSource::Auto => {
                    let db = self.fontdb();
                    resolve_font(&source, move || db)?
                }
                _ => resolve_font(&source, system_fontdb)?,
            };
            self.font = match resolved {
                Some(f) => FontState::Ready(Box::new(TextLayoutEngine::new(&f)?)),
                None => FontState::Missing,
            };
        }
        Ok(match &mut self.font {
            FontState::Ready(engine) => Some(engine.as_mut()),
            FontState::Unresolved | FontState::Missing => None,
        })
    }

    fn with_ctx(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut vello_cpu::RenderContext),
    ) -> vello_cpu::Pixmap {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        f(&mut ctx);
        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);
        pixmap
    }

    fn fill_path_scratch(
        &mut self,
        width: u16,
        height: u16,
        path: &BezPath,
    ) -> StarmapResult<vello_cpu::Pixmap> {
        let cpu_path = bezpath_to_cpu(path);
        Ok(self.with_ctx(width, height, |ctx| {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
            ctx.fill_path(&cpu_path);
        }))
    }

    fn text_scratch(
        &mut self,
        width: u16,
        height: u16,
        op: &TextOp,
    ) -> StarmapResult<Option<vello_cpu::Pixmap>> {
        let brush = TextBrushRgba8 {
            r: op.color.r,
            g: op.color.g,
            b: op.color.b,
            a: 255,
        };
        let Some(engine) = self.text_engine()? else {
            tracing::debug!(role = ?op.role, "no font; skipping text");
            return Ok(None);
        };
        let layout = engine.layout_line(&op.text, op.size_px, op.bold, brush)?;
        let font = engine.font(op.bold).clone();

        let x0 = op.center.x - f64::from(layout.width()) / 2.0;
        let y0 = op.center.y - f64::from(layout.height()) / 2.0;

        Ok(Some(self.with_ctx(width, height, |ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((x0, y0)));
            for line in layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let b = run.style().brush;
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(b.r, b.g, b.b, b.a));
                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(&font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        })))
    }
}

impl Default for CpuCompositor {
    fn default() -> Self {
        Self::new(CompositorOpts::default())
    }
}

/// Compose with a throwaway [`CpuCompositor`].
pub fn compose_once(
    chart: &SkyChart,
    config: &DesignerConfig,
    canvas: Canvas,
    opts: CompositorOpts,
) -> StarmapResult<CompositeOutcome> {
    CpuCompositor::new(opts).compose(chart, config, canvas)
}

/// Encode a raster as PNG bytes (straight alpha).
pub fn encode_png(raster: &RasterRGBA) -> StarmapResult<Vec<u8>> {
    let straight = raster.to_straight();
    let img = image::RgbaImage::from_raw(straight.width, straight.height, straight.data)
        .ok_or_else(|| StarmapError::render("raster size does not match its data"))?;
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| StarmapError::render(format!("encode png: {e}")))?;
    Ok(out)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/compose/cpu.rs"]
mod tests;
