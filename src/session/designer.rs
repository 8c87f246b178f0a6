use url::Url;

use crate::compose::cpu::{CompositorOpts, CpuCompositor, RasterRGBA};
use crate::config::model::{ConfigPatch, DesignerConfig};
use crate::foundation::core::Canvas;
use crate::foundation::error::{StarmapError, StarmapResult};
use crate::persist::geo::{GeoLocator, GeoOutcome, detect};
use crate::persist::share::{
    DEFAULT_SHARE_BASE, SharePayload, decode_from_url, encode_shareable, has_lat, parse_base,
    share_payload,
};
use crate::persist::store::ConfigStore;
use crate::preview::pipeline::{PassOutcome, PreviewPipeline};
use crate::sky::renderer::{SkyChart, SkyChartRenderer};
use crate::sky::settle::SettlePolicy;
use crate::wizard::checkout::CheckoutSummary;
use crate::wizard::machine::{Wizard, WizardStep};
use crate::wizard::steps::StepPatch;

/// Options for a [`DesignerSession`].
#[derive(Clone, Debug)]
pub struct SessionOpts {
    /// Size of the live preview raster.
    pub preview: Canvas,
    /// Base URL for share links.
    pub share_base: String,
    /// Renderer readiness polling.
    pub settle: SettlePolicy,
    /// Compositor used for the preview and for exports.
    pub compositor: CompositorOpts,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            preview: Canvas::square(600),
            share_base: DEFAULT_SHARE_BASE.to_owned(),
            settle: SettlePolicy::from_env(),
            compositor: CompositorOpts::default(),
        }
    }
}

/// What happened while mounting a session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MountReport {
    /// Fields restored from the store.
    pub restored: Vec<&'static str>,
    /// Fields taken from the opening URL.
    pub from_url: Vec<&'static str>,
    /// Whether first-visit geolocation replaced the location.
    pub geolocated: bool,
    /// Notice to show the user, if any.
    pub notice: Option<&'static str>,
}

/// Designer orchestrator: owns the wizard, mirrors every change into the store and
/// drives the live preview.
pub struct DesignerSession<S: ConfigStore> {
    wizard: Wizard,
    store: S,
    preview: PreviewPipeline,
    share_base: Url,
}

impl<S: ConfigStore> DesignerSession<S> {
    /// Build the initial design: defaults, then the stored design, then the opening
    /// URL's query.
    ///
    /// On the first visit the device position is requested through `locator`, unless
    /// the URL already carries a location.
    #[tracing::instrument(skip_all)]
    pub fn mount(
        opts: SessionOpts,
        store: S,
        url: Option<&Url>,
        locator: Option<&mut dyn GeoLocator>,
    ) -> StarmapResult<(Self, MountReport)> {
        let share_base = parse_base(&opts.share_base)?;
        let mut report = MountReport::default();
        let mut wizard = Wizard::new(DesignerConfig::default());

        if let Some(stored) = store.load() {
            report.restored = stored.touched_fields();
            wizard.seed(stored);
        }
        if let Some(url) = url {
            let patch = decode_from_url(url);
            report.from_url = patch.touched_fields();
            wizard.seed(patch);
        }

        let mut session = Self {
            wizard,
            store,
            preview: PreviewPipeline::new(
                CpuCompositor::new(opts.compositor),
                opts.preview,
                opts.settle,
            ),
            share_base,
        };

        if !session.store.visited() {
            if let Err(err) = session.store.mark_visited() {
                tracing::warn!(%err, "could not record first visit");
            }
            let url_has_location = url.is_some_and(has_lat);
            if let (false, Some(locator)) = (url_has_location, locator) {
                match detect(locator) {
                    GeoOutcome::Located(patch) => {
                        session.wizard.seed(patch);
                        report.geolocated = true;
                    }
                    GeoOutcome::Failed { notice, .. } => report.notice = Some(notice),
                }
            }
        }

        session.persist();
        tracing::info!(
            restored = report.restored.len(),
            from_url = report.from_url.len(),
            geolocated = report.geolocated,
            "designer session mounted"
        );
        Ok((session, report))
    }

    /// Current design.
    pub fn config(&self) -> &DesignerConfig {
        self.wizard.config()
    }

    /// Wizard navigation state.
    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Live preview state.
    pub fn preview(&self) -> &PreviewPipeline {
        &self.preview
    }

    /// Resize the live preview.
    pub fn set_preview_canvas(&mut self, canvas: Canvas) {
        self.preview.set_canvas(canvas);
    }

    /// Apply a step edit and save the result.
    pub fn apply(&mut self, patch: StepPatch) -> StarmapResult<ConfigPatch> {
        let applied = self.wizard.apply(patch)?;
        self.persist();
        Ok(applied)
    }

    /// Next step.
    pub fn next(&mut self) -> bool {
        self.wizard.next()
    }

    /// Previous step.
    pub fn back(&mut self) -> bool {
        self.wizard.back()
    }

    /// Jump to a reached step.
    pub fn go_to(&mut self, step: WizardStep) -> StarmapResult<()> {
        self.wizard.go_to(step)
    }

    /// Reset to defaults if `confirm` agrees; the defaults are saved.
    pub fn reset(&mut self, confirm: impl FnOnce() -> bool) -> bool {
        let done = self.wizard.reset(confirm);
        if done {
            self.persist();
        }
        done
    }

    /// "Use my current location". Returns a notice when the position is unavailable.
    pub fn detect_location(&mut self, locator: &mut dyn GeoLocator) -> Option<&'static str> {
        match detect(locator) {
            GeoOutcome::Located(patch) => {
                self.wizard.seed(patch);
                self.persist();
                None
            }
            GeoOutcome::Failed { notice, .. } => Some(notice),
        }
    }

    /// Link reproducing the current design.
    pub fn share_link(&self) -> Url {
        encode_shareable(&self.share_base, self.wizard.config())
    }

    /// Share sheet contents for the current design.
    pub fn share_payload(&self) -> SharePayload {
        share_payload(&self.share_base, self.wizard.config())
    }

    /// Stub checkout from the size step.
    pub fn checkout(&self) -> StarmapResult<CheckoutSummary> {
        self.wizard.checkout()
    }

    /// Bring the preview up to date with the current design.
    pub fn refresh_preview(&mut self, renderer: &mut dyn SkyChartRenderer) -> PassOutcome {
        self.preview.refresh(renderer, self.wizard.config())
    }

    /// Compose the poster at print resolution for the selected size.
    pub fn export(&mut self, chart: &SkyChart, dpi: u32) -> StarmapResult<RasterRGBA> {
        let config = self.wizard.config();
        let canvas = config.poster_size.print_canvas(dpi)?;
        tracing::info!(
            size = config.poster_size.as_str(),
            width = canvas.width,
            height = canvas.height,
            "exporting poster"
        );
        self.preview
            .compositor_mut()
            .compose(chart, config, canvas)?
            .into_raster()
            .ok_or_else(|| StarmapError::render("print canvas is empty"))
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.save(self.wizard.config()) {
            tracing::warn!(%err, "failed to save design; continuing");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/designer.rs"]
mod tests;
