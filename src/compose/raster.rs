use std::sync::Arc;

use crate::compose::pixel::premultiply_rgba8_in_place;
use crate::foundation::core::Canvas;
use crate::foundation::error::{StarmapError, StarmapResult};
use crate::sky::renderer::SkyChart;

/// Decode `chart` and stretch it over `canvas`, as premultiplied RGBA8.
pub fn decode_chart(
    chart: &SkyChart,
    canvas: Canvas,
    fontdb: Option<Arc<usvg::fontdb::Database>>,
) -> StarmapResult<Vec<u8>> {
    match chart {
        SkyChart::Svg(bytes) => {
            let tree = parse_svg(bytes, fontdb)?;
            rasterize_svg_to_premul_rgba8(&tree, canvas)
        }
        SkyChart::Png(bytes) => decode_png_to_premul_rgba8(bytes, canvas),
    }
}

/// Parse chart SVG bytes, resolving text against `fontdb` when given.
pub fn parse_svg(
    bytes: &[u8],
    fontdb: Option<Arc<usvg::fontdb::Database>>,
) -> StarmapResult<usvg::Tree> {
    let mut opts = usvg::Options::default();
    if let Some(db) = fontdb {
        opts.fontdb = db;
    }
    usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| StarmapError::render(format!("parse sky chart svg: {e}")))
}

/// Render `tree` scaled to fill `canvas`.
pub fn rasterize_svg_to_premul_rgba8(tree: &usvg::Tree, canvas: Canvas) -> StarmapResult<Vec<u8>> {
    let size = tree.size();
    if !(size.width() > 0.0 && size.height() > 0.0) {
        return Err(StarmapError::render("sky chart svg has invalid width/height"));
    }
    let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
        .ok_or_else(|| StarmapError::render("failed to allocate chart pixmap"))?;

    let sx = (canvas.width as f32) / size.width();
    let sy = (canvas.height as f32) / size.height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.take())
}

/// Decode a raster image and resize it to `canvas` when the sizes differ.
pub fn decode_png_to_premul_rgba8(bytes: &[u8], canvas: Canvas) -> StarmapResult<Vec<u8>> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| StarmapError::render(format!("decode sky chart image: {e}")))?;
    let mut rgba = img.to_rgba8();
    if rgba.dimensions() != (canvas.width, canvas.height) {
        rgba = image::imageops::resize(
            &rgba,
            canvas.width,
            canvas.height,
            image::imageops::FilterType::Triangle,
        );
    }
    let mut data = rgba.into_raw();
    premultiply_rgba8_in_place(&mut data);
    Ok(data)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/raster.rs"]
mod tests;
