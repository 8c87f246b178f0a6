use std::path::Path;

use chrono::NaiveDateTime;

use crate::foundation::error::{StarmapError, StarmapResult};
use crate::sky::celestial::CelestialConfig;

/// Image produced by a sky-chart renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkyChart {
    /// SVG document.
    Svg(Vec<u8>),
    /// PNG-encoded raster.
    Png(Vec<u8>),
}

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

impl SkyChart {
    /// Classify raw bytes by their signature. Anything that is not PNG is treated as SVG.
    pub fn sniff(bytes: Vec<u8>) -> Self {
        if bytes.starts_with(PNG_MAGIC) {
            SkyChart::Png(bytes)
        } else {
            SkyChart::Svg(bytes)
        }
    }

    /// Read and classify a chart file.
    pub fn from_path(path: impl AsRef<Path>) -> StarmapResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            StarmapError::render(format!("read sky chart '{}': {e}", path.display()))
        })?;
        Ok(Self::sniff(bytes))
    }

    /// Encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        match self {
            SkyChart::Svg(b) | SkyChart::Png(b) => b,
        }
    }

    /// Short format name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SkyChart::Svg(_) => "svg",
            SkyChart::Png(_) => "png",
        }
    }
}

/// One readiness check of the renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderPoll {
    /// Still drawing.
    Pending,
    /// Drawing finished.
    Ready(SkyChart),
    /// Drawing failed for good.
    Failed(String),
}

/// External sky-chart renderer driven imperatively.
///
/// A pass calls `display`, `set_date`, `set_location` and `redraw` in that order, then
/// polls until the chart is ready.
pub trait SkyChartRenderer {
    /// Whether the renderer can be used at all. Unavailable renderers get a
    /// placeholder raster instead of a chart.
    fn is_available(&self) -> bool {
        true
    }
    /// (Re)configure the chart.
    fn display(&mut self, cfg: &CelestialConfig) -> StarmapResult<()>;
    /// Observation instant.
    fn set_date(&mut self, at: NaiveDateTime);
    /// Observation point.
    fn set_location(&mut self, lat: f64, lng: f64);
    /// Start drawing with the current settings.
    fn redraw(&mut self);
    /// Check whether drawing finished.
    fn poll(&mut self) -> RenderPoll;
}

/// Renderer that serves a fixed chart, optionally after a number of pending polls.
///
/// Also records the calls it receives.
#[derive(Clone, Debug)]
pub struct StaticChartRenderer {
    chart: Option<SkyChart>,
    pending_polls: u32,
    remaining: u32,
    available: bool,
    last_config: Option<CelestialConfig>,
    last_date: Option<NaiveDateTime>,
    last_location: Option<(f64, f64)>,
    redraws: u32,
}

impl StaticChartRenderer {
    /// Serve `chart` on the first poll after each redraw.
    pub fn new(chart: SkyChart) -> Self {
        Self {
            chart: Some(chart),
            pending_polls: 0,
            remaining: 0,
            available: true,
            last_config: None,
            last_date: None,
            last_location: None,
            redraws: 0,
        }
    }

    /// Renderer that never finishes drawing.
    pub fn never_ready() -> Self {
        Self {
            chart: None,
            ..Self::new(SkyChart::Svg(Vec::new()))
        }
    }

    /// Renderer reporting itself as unavailable.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::never_ready()
        }
    }

    /// Answer `Pending` this many times after each redraw.
    pub fn with_pending_polls(mut self, n: u32) -> Self {
        self.pending_polls = n;
        self
    }

    /// Swap the chart served by later passes.
    pub fn set_chart(&mut self, chart: SkyChart) {
        self.chart = Some(chart);
    }

    /// Configuration received by the last `display`.
    pub fn last_config(&self) -> Option<&CelestialConfig> {
        self.last_config.as_ref()
    }

    /// Instant received by the last `set_date`.
    pub fn last_date(&self) -> Option<NaiveDateTime> {
        self.last_date
    }

    /// Point received by the last `set_location`, as `(lat, lng)`.
    pub fn last_location(&self) -> Option<(f64, f64)> {
        self.last_location
    }

    /// Number of redraws requested.
    pub fn redraws(&self) -> u32 {
        self.redraws
    }
}

impl SkyChartRenderer for StaticChartRenderer {
    fn is_available(&self) -> bool {
        self.available
    }

    fn display(&mut self, cfg: &CelestialConfig) -> StarmapResult<()> {
        self.last_config = Some(cfg.clone());
        Ok(())
    }

    fn set_date(&mut self, at: NaiveDateTime) {
        self.last_date = Some(at);
    }

    fn set_location(&mut self, lat: f64, lng: f64) {
        self.last_location = Some((lat, lng));
    }

    fn redraw(&mut self) {
        self.redraws += 1;
        self.remaining = self.pending_polls;
    }

    fn poll(&mut self) -> RenderPoll {
        if self.remaining > 0 {
            self.remaining -= 1;
            return RenderPoll::Pending;
        }
        match &self.chart {
            Some(chart) => RenderPoll::Ready(chart.clone()),
            None => RenderPoll::Pending,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sky/renderer.rs"]
mod tests;
