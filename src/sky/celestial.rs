//! Options handed to the external sky-chart renderer.
//!
//! Field names follow the d3-celestial option object, so the serialized form can be
//! passed to that library unchanged.

#![allow(missing_docs)]

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::config::model::DesignerConfig;
use crate::config::moment;
use crate::foundation::color::HexColor;
use crate::foundation::error::StarmapResult;

/// Star catalogue location used by the default renderer setup.
pub const DEFAULT_DATAPATH: &str = "https://cdn.jsdelivr.net/npm/d3-celestial@0.7.35/data/";

const FONT_STACK: &str = r#""Open Sans", Helvetica, Arial, sans-serif"#;

fn font(px: u32) -> String {
    format!("{px}px {FONT_STACK}")
}

/// Fill plus opacity.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FillStyle {
    pub fill: HexColor,
    pub opacity: f64,
}

/// Label text style.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LabelStyle {
    pub fill: HexColor,
    pub font: String,
    pub align: &'static str,
    pub baseline: &'static str,
}

/// Constellation name style: one font per rank.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankedLabelStyle {
    pub fill: HexColor,
    pub align: &'static str,
    pub baseline: &'static str,
    pub font: [String; 3],
}

/// Line stroke style.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineStyle {
    pub stroke: HexColor,
    pub width: f64,
    pub opacity: f64,
}

/// Just a visibility switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Toggle {
    pub show: bool,
}

impl Toggle {
    const OFF: Toggle = Toggle { show: false };
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StarsOpts {
    pub colors: bool,
    pub style: FillStyle,
    pub limit: f64,
    pub size: f64,
    pub exponent: f64,
    pub designation: bool,
    pub designation_style: LabelStyle,
    pub propername: bool,
    pub propername_style: LabelStyle,
    pub show: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstellationOpts {
    pub names: bool,
    pub names_type: &'static str,
    pub name_style: RankedLabelStyle,
    pub lines: bool,
    pub line_style: LineStyle,
    pub bounds: bool,
    pub show: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MilkyWayOpts {
    pub show: bool,
    pub style: FillStyle,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraticuleOpts {
    pub show: bool,
    pub stroke: HexColor,
    pub width: f64,
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LinesOpts {
    pub graticule: GraticuleOpts,
    pub equatorial: Toggle,
    pub ecliptic: Toggle,
    pub galactic: Toggle,
    pub supergalactic: Toggle,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BackgroundOpts {
    pub fill: HexColor,
    pub opacity: f64,
    pub stroke: HexColor,
    pub width: f64,
}

/// Complete renderer configuration for one design.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CelestialConfig {
    pub width: u32,
    pub projection: &'static str,
    pub transform: &'static str,
    /// `[lng, lat, 0]`.
    pub center: [f64; 3],
    pub adaptable: bool,
    pub interactive: bool,
    pub form: bool,
    pub location: bool,
    pub datapath: String,
    pub stars: StarsOpts,
    pub dsos: Toggle,
    pub constellations: ConstellationOpts,
    pub mw: MilkyWayOpts,
    pub lines: LinesOpts,
    pub background: BackgroundOpts,
    pub horizon: Toggle,
    pub planets: Toggle,
}

impl CelestialConfig {
    /// Renderer options for `config` drawn at `width` px (the shorter canvas side).
    pub fn for_design(config: &DesignerConfig, width: u32) -> Self {
        let pal = config.color_theme.palette();
        let (bg, fg, accent) = (pal.bg, pal.fg, pal.accent);
        let labels = config.show_labels;

        Self {
            width,
            projection: "airy",
            transform: "equatorial",
            center: [config.location.lng, config.location.lat, 0.0],
            adaptable: true,
            interactive: false,
            form: false,
            location: true,
            datapath: DEFAULT_DATAPATH.to_owned(),
            stars: StarsOpts {
                colors: true,
                style: FillStyle {
                    fill: fg,
                    opacity: 0.8,
                },
                limit: 6.0,
                size: 5.0,
                exponent: -0.28,
                designation: labels,
                designation_style: LabelStyle {
                    fill: fg,
                    font: font(11),
                    align: "left",
                    baseline: "top",
                },
                propername: labels,
                propername_style: LabelStyle {
                    fill: fg,
                    font: font(13),
                    align: "right",
                    baseline: "bottom",
                },
                show: true,
            },
            dsos: Toggle::OFF,
            constellations: ConstellationOpts {
                names: labels,
                names_type: "name",
                name_style: RankedLabelStyle {
                    fill: accent,
                    align: "center",
                    baseline: "middle",
                    font: [font(14), font(12), font(11)],
                },
                lines: config.show_constellations,
                line_style: LineStyle {
                    stroke: accent,
                    width: 1.0,
                    opacity: 0.6,
                },
                bounds: false,
                show: config.show_constellations,
            },
            mw: MilkyWayOpts {
                show: config.show_milky_way,
                style: FillStyle {
                    fill: fg,
                    opacity: 0.15,
                },
            },
            lines: LinesOpts {
                graticule: GraticuleOpts {
                    show: config.show_grid,
                    stroke: fg,
                    width: 0.6,
                    opacity: 0.3,
                },
                equatorial: Toggle::OFF,
                ecliptic: Toggle::OFF,
                galactic: Toggle::OFF,
                supergalactic: Toggle::OFF,
            },
            background: BackgroundOpts {
                fill: bg,
                opacity: 1.0,
                stroke: fg,
                width: 1.5,
            },
            horizon: Toggle::OFF,
            planets: Toggle::OFF,
        }
    }

    /// Override the star catalogue location.
    pub fn with_datapath(mut self, datapath: impl Into<String>) -> Self {
        self.datapath = datapath.into();
        self
    }
}

/// Observation instant, interpreted as local wall-clock time at the location.
pub fn observation_time(config: &DesignerConfig) -> StarmapResult<NaiveDateTime> {
    moment::parse_moment(&config.date, &config.time)
}

#[cfg(test)]
#[path = "../../tests/unit/sky/celestial.rs"]
mod tests;
