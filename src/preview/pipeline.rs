//! Live preview: drives the sky-chart renderer and the compositor for each design
//! change and keeps the latest committed raster.
//!
//! Every pass gets a generation number. Starting a pass invalidates all earlier
//! ones, and a pass that finishes after a newer one started is discarded.

use crate::compose::cpu::{CompositeOutcome, CpuCompositor, RasterRGBA};
use crate::config::model::DesignerConfig;
use crate::foundation::core::Canvas;
use crate::sky::celestial::{CelestialConfig, observation_time};
use crate::sky::renderer::SkyChartRenderer;
use crate::sky::settle::{SettlePolicy, Settled, wait_ready};

/// How a preview pass ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PassOutcome {
    /// A fresh chart raster replaced the previous one.
    Committed {
        /// Pass generation.
        generation: u64,
    },
    /// The renderer is unavailable; a placeholder raster was committed.
    Placeholder {
        /// Pass generation.
        generation: u64,
    },
    /// Nothing visual changed since the last commit; no pass was run.
    Unchanged,
    /// Empty canvas; nothing painted, previous raster kept.
    Skipped {
        /// Pass generation.
        generation: u64,
    },
    /// A newer pass started before this one finished; result discarded.
    Stale {
        /// Pass generation.
        generation: u64,
        /// Generation of the newest pass.
        latest: u64,
    },
    /// The renderer never became ready; previous raster kept.
    TimedOut {
        /// Pass generation.
        generation: u64,
        /// Polls spent.
        polls: u32,
    },
    /// Rendering or compositing failed; previous raster kept.
    Failed {
        /// Pass generation.
        generation: u64,
        /// Failure description.
        reason: String,
    },
}

impl PassOutcome {
    /// Whether the visible raster changed.
    pub fn committed(&self) -> bool {
        matches!(
            self,
            PassOutcome::Committed { .. } | PassOutcome::Placeholder { .. }
        )
    }
}

/// A started pass waiting for the renderer.
#[derive(Clone, Debug)]
pub struct PendingPass {
    generation: u64,
    fingerprint: u64,
    canvas: Canvas,
    config: DesignerConfig,
}

impl PendingPass {
    /// Generation of this pass.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Clone, Debug)]
struct Committed {
    generation: u64,
    /// `None` for placeholders, which never count as showing the design.
    fingerprint: Option<u64>,
    canvas: Canvas,
    raster: RasterRGBA,
}

/// Owner of the preview raster.
pub struct PreviewPipeline {
    compositor: CpuCompositor,
    canvas: Canvas,
    settle: SettlePolicy,
    generation: u64,
    committed: Option<Committed>,
}

impl PreviewPipeline {
    /// Pipeline drawing onto `canvas`.
    pub fn new(compositor: CpuCompositor, canvas: Canvas, settle: SettlePolicy) -> Self {
        Self {
            compositor,
            canvas,
            settle,
            generation: 0,
            committed: None,
        }
    }

    /// Current preview size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Resize the preview. The next refresh runs a pass even if the design is unchanged.
    pub fn set_canvas(&mut self, canvas: Canvas) {
        self.canvas = canvas;
    }

    /// Newest generation handed out.
    pub fn latest_generation(&self) -> u64 {
        self.generation
    }

    /// Latest committed raster.
    pub fn raster(&self) -> Option<&RasterRGBA> {
        self.committed.as_ref().map(|c| &c.raster)
    }

    /// Generation of the latest committed raster.
    pub fn committed_generation(&self) -> Option<u64> {
        self.committed.as_ref().map(|c| c.generation)
    }

    /// Compositor used by the pipeline.
    pub fn compositor_mut(&mut self) -> &mut CpuCompositor {
        &mut self.compositor
    }

    /// Whether `config` would look identical to the committed raster.
    pub fn is_current(&self, config: &DesignerConfig) -> bool {
        self.committed.as_ref().is_some_and(|c| {
            c.fingerprint == Some(config.visual_fingerprint()) && c.canvas == self.canvas
        })
    }

    /// Start a pass for `config`: reconfigure the renderer and ask it to redraw.
    ///
    /// Any pass started earlier becomes stale.
    #[tracing::instrument(skip_all)]
    pub fn start(
        &mut self,
        renderer: &mut dyn SkyChartRenderer,
        config: &DesignerConfig,
    ) -> PendingPass {
        self.generation += 1;
        let pass = PendingPass {
            generation: self.generation,
            fingerprint: config.visual_fingerprint(),
            canvas: self.canvas,
            config: config.clone(),
        };

        if renderer.is_available() && !self.canvas.is_empty() {
            let width = self.canvas.width.min(self.canvas.height);
            let cfg = CelestialConfig::for_design(config, width);
            if let Err(err) = renderer.display(&cfg) {
                tracing::warn!(%err, "sky chart renderer rejected its configuration");
            }
            match observation_time(config) {
                Ok(at) => renderer.set_date(at),
                Err(err) => tracing::warn!(%err, "keeping previous observation time"),
            }
            renderer.set_location(config.location.lat, config.location.lng);
            renderer.redraw();
        }
        pass
    }

    /// Wait for the renderer and compose the pass, committing it if still current.
    pub fn finish(
        &mut self,
        pass: PendingPass,
        renderer: &mut dyn SkyChartRenderer,
    ) -> PassOutcome {
        let generation = pass.generation;
        if let Some(stale) = self.check_stale(generation) {
            return stale;
        }
        if pass.canvas.is_empty() {
            tracing::debug!(generation, "empty preview canvas");
            return PassOutcome::Skipped { generation };
        }

        if !renderer.is_available() {
            tracing::warn!(generation, "sky chart renderer unavailable; using placeholder");
            return match self
                .compositor
                .compose_placeholder(&pass.config, pass.canvas)
            {
                Ok(outcome) => self.commit(pass, outcome, true),
                Err(err) => Self::failed(generation, err.to_string()),
            };
        }

        let chart = match wait_ready(renderer, self.settle, std::thread::sleep) {
            Settled::Ready { chart, polls } => {
                tracing::debug!(generation, polls, kind = chart.kind(), "sky chart ready");
                chart
            }
            Settled::TimedOut { polls } => {
                return PassOutcome::TimedOut { generation, polls };
            }
            Settled::Failed(reason) => return Self::failed(generation, reason),
        };

        if let Some(stale) = self.check_stale(generation) {
            return stale;
        }
        match self.compositor.compose(&chart, &pass.config, pass.canvas) {
            Ok(outcome) => self.commit(pass, outcome, false),
            Err(err) => Self::failed(generation, err.to_string()),
        }
    }

    /// Run a full pass for `config` unless the committed raster already shows it.
    pub fn refresh(
        &mut self,
        renderer: &mut dyn SkyChartRenderer,
        config: &DesignerConfig,
    ) -> PassOutcome {
        if self.is_current(config) {
            tracing::debug!("design unchanged visually; skipping composite");
            return PassOutcome::Unchanged;
        }
        let pass = self.start(renderer, config);
        self.finish(pass, renderer)
    }

    fn check_stale(&self, generation: u64) -> Option<PassOutcome> {
        (generation != self.generation).then(|| {
            tracing::debug!(generation, latest = self.generation, "discarding stale pass");
            PassOutcome::Stale {
                generation,
                latest: self.generation,
            }
        })
    }

    fn failed(generation: u64, reason: String) -> PassOutcome {
        tracing::warn!(generation, %reason, "preview pass failed; keeping previous raster");
        PassOutcome::Failed { generation, reason }
    }

    fn commit(
        &mut self,
        pass: PendingPass,
        outcome: CompositeOutcome,
        placeholder: bool,
    ) -> PassOutcome {
        let generation = pass.generation;
        let Some(raster) = outcome.into_raster() else {
            return PassOutcome::Skipped { generation };
        };
        self.committed = Some(Committed {
            generation,
            fingerprint: (!placeholder).then_some(pass.fingerprint),
            canvas: pass.canvas,
            raster,
        });
        if placeholder {
            PassOutcome::Placeholder { generation }
        } else {
            PassOutcome::Committed { generation }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preview/pipeline.rs"]
mod tests;
