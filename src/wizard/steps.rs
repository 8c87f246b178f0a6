//! Per-step patches and the option lists each step offers.
//!
//! Every producer here is a pure function of the current config. A step can only
//! build its own patch type, so no step can touch another step's fields.

use crate::config::model::{
    ConfigPatch, DesignerConfig, FOOTNOTE_MAX_CHARS, Location, TITLE_MAX_CHARS, truncate_chars,
};
use crate::config::moment;
use crate::config::poster::PosterSize;
use crate::config::theme::{ColorTheme, ShapeMask, ThemePalette};
use crate::wizard::machine::WizardStep;

/// Name given to a location obtained from the device position.
pub const CURRENT_LOCATION_NAME: &str = "Current Location";

/// Edit of the moment step: location, date, time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MomentPatch {
    /// New location.
    pub location: Option<Location>,
    /// New `YYYY-MM-DD` date.
    pub date: Option<String>,
    /// New `HH:MM` time.
    pub time: Option<String>,
}

/// Edit of the design step: theme, shape, overlays.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DesignPatch {
    /// New palette.
    pub color_theme: Option<ColorTheme>,
    /// New shape.
    pub shape_mask: Option<ShapeMask>,
    /// Constellation lines.
    pub show_constellations: Option<bool>,
    /// Labels.
    pub show_labels: Option<bool>,
    /// Graticule.
    pub show_grid: Option<bool>,
    /// Milky Way.
    pub show_milky_way: Option<bool>,
}

/// Edit of the text step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextPatch {
    /// New title.
    pub title: Option<String>,
    /// New footnote.
    pub footnote: Option<String>,
}

/// Edit of the size step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SizePatch {
    /// New poster size.
    pub poster_size: Option<PosterSize>,
    /// Frame preview toggle.
    pub show_frame: Option<bool>,
}

/// A patch tagged with the step that produced it.
#[derive(Clone, Debug, PartialEq)]
pub enum StepPatch {
    /// From the moment step.
    Moment(MomentPatch),
    /// From the design step.
    Design(DesignPatch),
    /// From the text step.
    Text(TextPatch),
    /// From the size step.
    Size(SizePatch),
}

impl StepPatch {
    /// Owning step.
    pub fn step(&self) -> WizardStep {
        match self {
            StepPatch::Moment(_) => WizardStep::Moment,
            StepPatch::Design(_) => WizardStep::Design,
            StepPatch::Text(_) => WizardStep::Text,
            StepPatch::Size(_) => WizardStep::Size,
        }
    }

    /// Widen to a config patch. Text values are limited here.
    pub fn into_config_patch(self) -> ConfigPatch {
        match self {
            StepPatch::Moment(p) => ConfigPatch {
                location: p.location,
                date: p.date,
                time: p.time,
                ..ConfigPatch::default()
            },
            StepPatch::Design(p) => ConfigPatch {
                color_theme: p.color_theme,
                shape_mask: p.shape_mask,
                show_constellations: p.show_constellations,
                show_labels: p.show_labels,
                show_grid: p.show_grid,
                show_milky_way: p.show_milky_way,
                ..ConfigPatch::default()
            },
            StepPatch::Text(p) => ConfigPatch {
                title: p.title,
                footnote: p.footnote,
                ..ConfigPatch::default()
            }
            .limited(),
            StepPatch::Size(p) => ConfigPatch {
                poster_size: p.poster_size,
                show_frame: p.show_frame,
                ..ConfigPatch::default()
            },
        }
    }
}

impl ConfigPatch {
    /// Whether this patch sets any field owned by `step`.
    pub fn touches(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::Moment => {
                self.location.is_some() || self.date.is_some() || self.time.is_some()
            }
            WizardStep::Design => {
                self.color_theme.is_some()
                    || self.shape_mask.is_some()
                    || self.show_constellations.is_some()
                    || self.show_labels.is_some()
                    || self.show_grid.is_some()
                    || self.show_milky_way.is_some()
            }
            WizardStep::Text => self.title.is_some() || self.footnote.is_some(),
            WizardStep::Size => self.poster_size.is_some() || self.show_frame.is_some(),
        }
    }
}

// ---------------------------------------------------------------------------------------------
// Moment

const POPULAR_CITIES: [(&str, f64, f64, &str); 8] = [
    ("New York, USA", 40.7128, -74.006, "America/New_York"),
    ("London, UK", 51.5074, -0.1278, "Europe/London"),
    ("Paris, France", 48.8566, 2.3522, "Europe/Paris"),
    ("Tokyo, Japan", 35.6762, 139.6503, "Asia/Tokyo"),
    ("Sydney, Australia", -33.8688, 151.2093, "Australia/Sydney"),
    ("Los Angeles, USA", 34.0522, -118.2437, "America/Los_Angeles"),
    ("Rome, Italy", 41.9028, 12.4964, "Europe/Rome"),
    ("Dubai, UAE", 25.2048, 55.2708, "Asia/Dubai"),
];

/// Quick-pick city catalogue.
pub fn popular_cities() -> Vec<Location> {
    POPULAR_CITIES
        .iter()
        .map(|&(name, lat, lng, tz)| Location::new(name, lat, lng).with_timezone(tz))
        .collect()
}

/// Case-insensitive substring search over [`popular_cities`].
pub fn search_cities(query: &str) -> Vec<Location> {
    let q = query.trim().to_lowercase();
    popular_cities()
        .into_iter()
        .filter(|c| c.name.to_lowercase().contains(&q))
        .collect()
}

impl MomentPatch {
    /// Pick a location.
    pub fn location(location: Location) -> StepPatch {
        StepPatch::Moment(MomentPatch {
            location: Some(location),
            ..MomentPatch::default()
        })
    }

    /// Use a detected device position.
    pub fn detected_position(lat: f64, lng: f64) -> StepPatch {
        Self::location(Location::new(CURRENT_LOCATION_NAME, lat, lng))
    }

    /// Set the date string as typed.
    pub fn date(date: impl Into<String>) -> StepPatch {
        StepPatch::Moment(MomentPatch {
            date: Some(date.into()),
            ..MomentPatch::default()
        })
    }

    /// Set the time string as typed.
    pub fn time(time: impl Into<String>) -> StepPatch {
        StepPatch::Moment(MomentPatch {
            time: Some(time.into()),
            ..MomentPatch::default()
        })
    }

    /// "Today" shortcut.
    pub fn today() -> StepPatch {
        Self::date(moment::today())
    }

    /// "Now" shortcut.
    pub fn now() -> StepPatch {
        Self::time(moment::now())
    }
}

/// `"40.7128°, -74.0060°"`.
pub fn coordinates_label(location: &Location) -> String {
    format!("{:.4}°, {:.4}°", location.lat, location.lng)
}

// ---------------------------------------------------------------------------------------------
// Design

/// One of the four independent overlay toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Overlay {
    /// Constellation lines.
    Constellations,
    /// Star and constellation names.
    Labels,
    /// Coordinate grid.
    Grid,
    /// Milky Way band.
    MilkyWay,
}

impl Overlay {
    /// All overlays in display order.
    pub const ALL: [Overlay; 4] = [
        Overlay::Constellations,
        Overlay::Labels,
        Overlay::Grid,
        Overlay::MilkyWay,
    ];

    /// Toggle title.
    pub fn label(self) -> &'static str {
        match self {
            Overlay::Constellations => "Constellations",
            Overlay::Labels => "Labels",
            Overlay::Grid => "Grid",
            Overlay::MilkyWay => "Milky Way",
        }
    }

    /// Toggle help text.
    pub fn description(self) -> &'static str {
        match self {
            Overlay::Constellations => "Show constellation lines",
            Overlay::Labels => "Show star and constellation names",
            Overlay::Grid => "Show coordinate grid lines",
            Overlay::MilkyWay => "Show the Milky Way galaxy",
        }
    }

    /// Current value in `config`.
    pub fn is_on(self, config: &DesignerConfig) -> bool {
        match self {
            Overlay::Constellations => config.show_constellations,
            Overlay::Labels => config.show_labels,
            Overlay::Grid => config.show_grid,
            Overlay::MilkyWay => config.show_milky_way,
        }
    }
}

/// Theme picker entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemeOption {
    /// The theme.
    pub theme: ColorTheme,
    /// Its palette.
    pub palette: &'static ThemePalette,
    /// Currently chosen.
    pub selected: bool,
}

/// Shape picker entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapeOption {
    /// The shape.
    pub shape: ShapeMask,
    /// Currently chosen.
    pub selected: bool,
}

/// All theme choices for `config`.
pub fn theme_options(config: &DesignerConfig) -> Vec<ThemeOption> {
    ColorTheme::ALL
        .into_iter()
        .map(|theme| ThemeOption {
            theme,
            palette: theme.palette(),
            selected: theme == config.color_theme,
        })
        .collect()
}

/// All shape choices for `config`.
pub fn shape_options(config: &DesignerConfig) -> Vec<ShapeOption> {
    ShapeMask::ALL
        .into_iter()
        .map(|shape| ShapeOption {
            shape,
            selected: shape == config.shape_mask,
        })
        .collect()
}

impl DesignPatch {
    /// Pick a theme.
    pub fn theme(theme: ColorTheme) -> StepPatch {
        StepPatch::Design(DesignPatch {
            color_theme: Some(theme),
            ..DesignPatch::default()
        })
    }

    /// Pick a shape.
    pub fn shape(shape: ShapeMask) -> StepPatch {
        StepPatch::Design(DesignPatch {
            shape_mask: Some(shape),
            ..DesignPatch::default()
        })
    }

    /// Set one overlay toggle.
    pub fn overlay(overlay: Overlay, on: bool) -> StepPatch {
        let mut p = DesignPatch::default();
        match overlay {
            Overlay::Constellations => p.show_constellations = Some(on),
            Overlay::Labels => p.show_labels = Some(on),
            Overlay::Grid => p.show_grid = Some(on),
            Overlay::MilkyWay => p.show_milky_way = Some(on),
        }
        StepPatch::Design(p)
    }
}

// ---------------------------------------------------------------------------------------------
// Text

/// A suggested title/footnote pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextPreset {
    /// Suggested title.
    pub title: String,
    /// Suggested footnote.
    pub footnote: String,
}

impl TextPreset {
    /// Patch applying both values.
    pub fn patch(&self) -> StepPatch {
        StepPatch::Text(TextPatch {
            title: Some(self.title.clone()),
            footnote: Some(self.footnote.clone()),
        })
    }
}

fn long_date_or_raw(date: &str) -> String {
    moment::parse_date(date)
        .map(moment::long_date)
        .unwrap_or_else(|_| date.to_owned())
}

/// `"{location} • {Month d, yyyy} • {HH:MM}"`, limited to the footnote length.
pub fn default_footnote(config: &DesignerConfig) -> String {
    let s = format!(
        "{} • {} • {}",
        config.location.name,
        long_date_or_raw(&config.date),
        config.time
    );
    truncate_chars(&s, FOOTNOTE_MAX_CHARS)
}

/// The three example presets offered on the text step.
pub fn text_presets(config: &DesignerConfig) -> Vec<TextPreset> {
    let city = config
        .location
        .name
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .to_owned();
    vec![
        TextPreset {
            title: "Our Wedding Night".to_owned(),
            footnote: format!(
                "{} • {}",
                config.location.name,
                long_date_or_raw(&config.date)
            ),
        },
        TextPreset {
            title: "The Night We Met".to_owned(),
            footnote: "Where it all began ✨".to_owned(),
        },
        TextPreset {
            title: "A Moment in Time".to_owned(),
            footnote: format!("Stars above {city}"),
        },
    ]
}

/// `"12/50 characters"`.
pub fn char_counter(text: &str, max: usize) -> String {
    format!("{}/{} characters", text.chars().count(), max)
}

impl TextPatch {
    /// Set the title (truncated to its limit).
    pub fn title(title: impl AsRef<str>) -> StepPatch {
        StepPatch::Text(TextPatch {
            title: Some(truncate_chars(title.as_ref(), TITLE_MAX_CHARS)),
            ..TextPatch::default()
        })
    }

    /// Set the footnote (truncated to its limit).
    pub fn footnote(footnote: impl AsRef<str>) -> StepPatch {
        StepPatch::Text(TextPatch {
            footnote: Some(truncate_chars(footnote.as_ref(), FOOTNOTE_MAX_CHARS)),
            ..TextPatch::default()
        })
    }

    /// "Use location & date" shortcut.
    pub fn default_footnote(config: &DesignerConfig) -> StepPatch {
        Self::footnote(default_footnote(config))
    }
}

// ---------------------------------------------------------------------------------------------
// Size

/// Size picker entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeOption {
    /// The size.
    pub size: PosterSize,
    /// Dimension label.
    pub label: &'static str,
    /// Price in USD.
    pub price_usd: u32,
    /// Highlighted as popular (hidden while selected).
    pub popular_badge: bool,
    /// Currently chosen.
    pub selected: bool,
}

/// All size choices for `config`.
pub fn size_options(config: &DesignerConfig) -> Vec<SizeOption> {
    PosterSize::ALL
        .into_iter()
        .map(|size| {
            let selected = size == config.poster_size;
            SizeOption {
                size,
                label: size.dims().label,
                price_usd: size.price_usd(),
                popular_badge: size.is_popular() && !selected,
                selected,
            }
        })
        .collect()
}

impl SizePatch {
    /// Pick a size.
    pub fn size(size: PosterSize) -> StepPatch {
        StepPatch::Size(SizePatch {
            poster_size: Some(size),
            ..SizePatch::default()
        })
    }

    /// Toggle the frame preview.
    pub fn frame(on: bool) -> StepPatch {
        StepPatch::Size(SizePatch {
            show_frame: Some(on),
            ..SizePatch::default()
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/wizard/steps.rs"]
mod tests;
