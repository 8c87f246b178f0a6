//! Starmap is the core of a star-map poster designer.
//!
//! A design is a flat [`DesignerConfig`] edited through a four-step [`Wizard`]. The
//! sky chart itself comes from an external [`SkyChartRenderer`]; the crate composes
//! it with the chosen silhouette, overlay text and frame into an RGBA raster on the
//! CPU.
//!
//! - Mount a [`DesignerSession`] over a [`ConfigStore`]
//! - Apply [`StepPatch`]es and navigate the wizard
//! - Refresh the live preview or export a print raster with [`CpuCompositor`]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

/// Sky-chart compositing on the CPU.
pub mod compose;
/// Design value object, themes and poster sizes.
pub mod config;
/// Durable store, share links and geolocation seeding.
pub mod persist;
/// Live preview passes.
pub mod preview;
/// Designer orchestration.
pub mod session;
/// External sky-chart renderer contract.
pub mod sky;
/// Step-by-step designer flow.
pub mod wizard;

pub use crate::foundation::color::HexColor;
pub use crate::foundation::core::{
    Affine, BezPath, Canvas, Point, Rect, Rgba8Premul, Vec2,
};
pub use crate::foundation::error::{StarmapError, StarmapResult};

pub use crate::compose::cpu::{
    CompositeOutcome, CompositorOpts, CpuCompositor, RasterRGBA, compose_once, encode_png,
};
pub use crate::compose::plan::{CompositePlan, PaintOp, TextLayoutOpts, compile_plan};
pub use crate::compose::text::FontSource;
pub use crate::config::model::{ConfigPatch, DesignerConfig, Location, merge};
pub use crate::config::poster::PosterSize;
pub use crate::config::theme::{ColorTheme, ShapeMask, ThemePalette};
pub use crate::persist::geo::{GeoError, GeoLocator, GeoOutcome};
pub use crate::persist::store::{ConfigStore, FileStore, MemoryStore};
pub use crate::preview::pipeline::{PassOutcome, PreviewPipeline};
pub use crate::session::designer::{DesignerSession, MountReport, SessionOpts};
pub use crate::sky::celestial::CelestialConfig;
pub use crate::sky::renderer::{RenderPoll, SkyChart, SkyChartRenderer, StaticChartRenderer};
pub use crate::sky::settle::SettlePolicy;
pub use crate::wizard::machine::{Wizard, WizardStep};
pub use crate::wizard::steps::StepPatch;
