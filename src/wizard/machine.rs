use serde::{Deserialize, Serialize};

use crate::config::model::{ConfigPatch, DesignerConfig};
use crate::foundation::error::{StarmapError, StarmapResult};
use crate::wizard::checkout::CheckoutSummary;
use crate::wizard::steps::StepPatch;

/// One screen of the designer, in navigation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    /// Location, date and time.
    Moment,
    /// Theme, shape and overlays.
    Design,
    /// Title and footnote.
    Text,
    /// Poster size and frame.
    Size,
}

impl WizardStep {
    /// Steps in order.
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Moment,
        WizardStep::Design,
        WizardStep::Text,
        WizardStep::Size,
    ];

    /// 0-based position.
    pub fn index(self) -> usize {
        match self {
            WizardStep::Moment => 0,
            WizardStep::Design => 1,
            WizardStep::Text => 2,
            WizardStep::Size => 3,
        }
    }

    /// Inverse of [`WizardStep::index`].
    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    /// Following step, `None` at the end.
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Preceding step, `None` at the start.
    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Moment => "Moment",
            WizardStep::Design => "Design",
            WizardStep::Text => "Text",
            WizardStep::Size => "Size",
        }
    }

    /// Indicator glyph.
    pub fn icon(self) -> &'static str {
        match self {
            WizardStep::Moment => "📅",
            WizardStep::Design => "🎨",
            WizardStep::Text => "✏️",
            WizardStep::Size => "📏",
        }
    }
}

/// Indicator row entry for one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepState {
    /// The step.
    pub step: WizardStep,
    /// Currently shown.
    pub active: bool,
    /// Before the current step.
    pub completed: bool,
    /// Reachable by direct navigation.
    pub clickable: bool,
}

/// Linear four-step designer flow owning the [`DesignerConfig`].
#[derive(Clone, Debug)]
pub struct Wizard {
    config: DesignerConfig,
    step: WizardStep,
    furthest: WizardStep,
}

impl Wizard {
    /// Start at [`WizardStep::Moment`] with `config`.
    pub fn new(config: DesignerConfig) -> Self {
        Self {
            config,
            step: WizardStep::Moment,
            furthest: WizardStep::Moment,
        }
    }

    /// Read-only snapshot of the current design.
    pub fn config(&self) -> &DesignerConfig {
        &self.config
    }

    /// Current step.
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Furthest step ever reached since the last reset.
    pub fn furthest_reached(&self) -> WizardStep {
        self.furthest
    }

    /// Advance one step. Returns `false` (no-op) at [`WizardStep::Size`].
    pub fn next(&mut self) -> bool {
        let Some(next) = self.step.next() else {
            return false;
        };
        self.step = next;
        self.furthest = self.furthest.max(next);
        tracing::debug!(step = next.label(), "wizard advanced");
        true
    }

    /// Retreat one step. Returns `false` (no-op) at [`WizardStep::Moment`].
    pub fn back(&mut self) -> bool {
        let Some(prev) = self.step.prev() else {
            return false;
        };
        self.step = prev;
        tracing::debug!(step = prev.label(), "wizard retreated");
        true
    }

    /// Whether `step` can be reached by direct navigation.
    pub fn can_visit(&self, step: WizardStep) -> bool {
        step <= self.furthest
    }

    /// Jump to an already reached step. Steps beyond the furthest reached one are
    /// rejected and leave the state unchanged.
    pub fn go_to(&mut self, step: WizardStep) -> StarmapResult<()> {
        if !self.can_visit(step) {
            return Err(StarmapError::navigation(format!(
                "step '{}' is not reachable yet (furthest reached: '{}')",
                step.label(),
                self.furthest.label()
            )));
        }
        self.step = step;
        Ok(())
    }

    /// Indicator entries for all steps.
    pub fn step_states(&self) -> Vec<StepState> {
        WizardStep::ALL
            .into_iter()
            .map(|s| StepState {
                step: s,
                active: s == self.step,
                completed: s < self.step,
                clickable: self.can_visit(s),
            })
            .collect()
    }

    /// `"Step 2 of 4"`.
    pub fn progress_label(&self) -> String {
        format!(
            "Step {} of {}",
            self.step.index() + 1,
            WizardStep::ALL.len()
        )
    }

    /// Merge a step's patch. The patch must belong to the current step.
    ///
    /// Returns the config-level patch that was applied.
    pub fn apply(&mut self, patch: StepPatch) -> StarmapResult<ConfigPatch> {
        if patch.step() != self.step {
            return Err(StarmapError::navigation(format!(
                "'{}' step cannot edit '{}' fields",
                self.step.label(),
                patch.step().label()
            )));
        }
        let patch = patch.into_config_patch();
        tracing::debug!(fields = ?patch.touched_fields(), "wizard patch");
        self.config.apply(patch.clone());
        Ok(patch)
    }

    /// Merge a patch coming from outside the step forms (stored state, share links,
    /// geolocation). Navigation state is untouched.
    pub fn seed(&mut self, patch: ConfigPatch) {
        self.config.apply(patch);
    }

    /// Restore defaults and return to the first step, if `confirm` agrees.
    ///
    /// Returns whether the reset happened.
    pub fn reset(&mut self, confirm: impl FnOnce() -> bool) -> bool {
        if !confirm() {
            return false;
        }
        self.config = DesignerConfig::default();
        self.step = WizardStep::Moment;
        self.furthest = WizardStep::Moment;
        tracing::info!("designer reset to defaults");
        true
    }

    /// Terminal action, only available on the size step.
    pub fn checkout(&self) -> StarmapResult<CheckoutSummary> {
        if self.step != WizardStep::Size {
            return Err(StarmapError::navigation(
                "checkout is only available from the size step",
            ));
        }
        Ok(CheckoutSummary::for_design(&self.config))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/wizard/machine.rs"]
mod tests;
