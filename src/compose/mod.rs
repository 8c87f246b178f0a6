/// CPU execution of composite plans.
pub mod cpu;
/// Clip silhouettes.
pub mod mask;
pub(crate) mod pixel;
/// Paint operations derived from a design.
pub mod plan;
/// Chart decoding to premultiplied RGBA8.
pub mod raster;
/// Font resolution and text layout.
pub mod text;
