use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::moment;
use crate::config::poster::PosterSize;
use crate::config::theme::{ColorTheme, ShapeMask};
use crate::foundation::math::Fnv1a64;

/// Input-boundary limit for [`DesignerConfig::title`], in chars.
pub const TITLE_MAX_CHARS: usize = 50;
/// Input-boundary limit for [`DesignerConfig::footnote`], in chars.
pub const FOOTNOTE_MAX_CHARS: usize = 100;

/// Observation point. Replaced wholesale, never patched field by field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Display name, e.g. `"London, UK"`.
    pub name: String,
    /// Latitude in degrees, `[-90, 90]`.
    pub lat: f64,
    /// Longitude in degrees, `[-180, 180]`.
    pub lng: f64,
    /// IANA timezone, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl Location {
    /// Location without a timezone.
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
            timezone: None,
        }
    }

    /// Attach a timezone.
    pub fn with_timezone(mut self, tz: impl Into<String>) -> Self {
        self.timezone = Some(tz.into());
        self
    }

    /// Whether both coordinates are finite and in range.
    pub fn in_range(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl Default for Location {
    fn default() -> Self {
        Location::new("New York, USA", 40.7128, -74.0060).with_timezone("America/New_York")
    }
}

/// Complete description of one star-map design. Every field is always populated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignerConfig {
    /// Where the sky is observed from.
    pub location: Location,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM`, 24-hour.
    pub time: String,

    /// Palette.
    pub color_theme: ColorTheme,
    /// Clipping silhouette.
    pub shape_mask: ShapeMask,
    /// Constellation lines.
    pub show_constellations: bool,
    /// Star and constellation names.
    pub show_labels: bool,
    /// Coordinate graticule.
    pub show_grid: bool,
    /// Milky Way band.
    pub show_milky_way: bool,

    /// Headline, at most [`TITLE_MAX_CHARS`].
    pub title: String,
    /// Bottom line, at most [`FOOTNOTE_MAX_CHARS`].
    pub footnote: String,

    /// Print format.
    pub poster_size: PosterSize,
    /// Frame preview toggle.
    pub show_frame: bool,
}

impl Default for DesignerConfig {
    fn default() -> Self {
        Self {
            location: Location::default(),
            date: moment::today(),
            time: "20:00".to_owned(),
            color_theme: ColorTheme::Dark,
            shape_mask: ShapeMask::Plain,
            show_constellations: true,
            show_labels: false,
            show_grid: false,
            show_milky_way: true,
            title: String::new(),
            footnote: String::new(),
            poster_size: PosterSize::M,
            show_frame: false,
        }
    }
}

/// Partial update of a [`DesignerConfig`]. `None` means "leave unchanged".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigPatch {
    /// Replaces [`DesignerConfig::location`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Replaces [`DesignerConfig::date`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Replaces [`DesignerConfig::time`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Replaces [`DesignerConfig::color_theme`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_theme: Option<ColorTheme>,
    /// Replaces [`DesignerConfig::shape_mask`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_mask: Option<ShapeMask>,
    /// Replaces [`DesignerConfig::show_constellations`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_constellations: Option<bool>,
    /// Replaces [`DesignerConfig::show_labels`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_labels: Option<bool>,
    /// Replaces [`DesignerConfig::show_grid`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_grid: Option<bool>,
    /// Replaces [`DesignerConfig::show_milky_way`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_milky_way: Option<bool>,
    /// Replaces [`DesignerConfig::title`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Replaces [`DesignerConfig::footnote`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footnote: Option<String>,
    /// Replaces [`DesignerConfig::poster_size`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_size: Option<PosterSize>,
    /// Replaces [`DesignerConfig::show_frame`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_frame: Option<bool>,
}

/// Shallow merge: every `Some` field of `patch` replaces the field of `current`.
pub fn merge(current: &DesignerConfig, patch: &ConfigPatch) -> DesignerConfig {
    let mut out = current.clone();
    out.apply(patch.clone());
    out
}

impl DesignerConfig {
    /// In-place form of [`merge`].
    pub fn apply(&mut self, patch: ConfigPatch) {
        let ConfigPatch {
            location,
            date,
            time,
            color_theme,
            shape_mask,
            show_constellations,
            show_labels,
            show_grid,
            show_milky_way,
            title,
            footnote,
            poster_size,
            show_frame,
        } = patch;

        if let Some(v) = location {
            self.location = v;
        }
        if let Some(v) = date {
            self.date = v;
        }
        if let Some(v) = time {
            self.time = v;
        }
        if let Some(v) = color_theme {
            self.color_theme = v;
        }
        if let Some(v) = shape_mask {
            self.shape_mask = v;
        }
        if let Some(v) = show_constellations {
            self.show_constellations = v;
        }
        if let Some(v) = show_labels {
            self.show_labels = v;
        }
        if let Some(v) = show_grid {
            self.show_grid = v;
        }
        if let Some(v) = show_milky_way {
            self.show_milky_way = v;
        }
        if let Some(v) = title {
            self.title = v;
        }
        if let Some(v) = footnote {
            self.footnote = v;
        }
        if let Some(v) = poster_size {
            self.poster_size = v;
        }
        if let Some(v) = show_frame {
            self.show_frame = v;
        }
    }

    /// Report values outside their documented ranges. Nothing is rejected here.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if !self.location.in_range() {
            issues.push(ConfigIssue::LocationOutOfRange {
                lat: self.location.lat,
                lng: self.location.lng,
            });
        }
        if moment::parse_date(&self.date).is_err() {
            issues.push(ConfigIssue::InvalidDate(self.date.clone()));
        }
        if moment::parse_time(&self.time).is_err() {
            issues.push(ConfigIssue::InvalidTime(self.time.clone()));
        }
        let title_len = self.title.chars().count();
        if title_len > TITLE_MAX_CHARS {
            issues.push(ConfigIssue::TitleTooLong(title_len));
        }
        let footnote_len = self.footnote.chars().count();
        if footnote_len > FOOTNOTE_MAX_CHARS {
            issues.push(ConfigIssue::FootnoteTooLong(footnote_len));
        }
        issues
    }

    /// Fingerprint over every field that changes the composed image.
    ///
    /// `poster_size` is excluded: it only affects pricing and the print raster size,
    /// which is carried separately by the destination canvas.
    pub fn visual_fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_str(&self.location.name);
        h.write_f64(self.location.lat);
        h.write_f64(self.location.lng);
        h.write_str(&self.date);
        h.write_str(&self.time);
        h.write_str(self.color_theme.as_str());
        h.write_str(self.shape_mask.as_str());
        h.write_bool(self.show_constellations);
        h.write_bool(self.show_labels);
        h.write_bool(self.show_grid);
        h.write_bool(self.show_milky_way);
        h.write_str(&self.title);
        h.write_str(&self.footnote);
        h.write_bool(self.show_frame);
        h.finish()
    }
}

/// A value outside the range the UI would produce.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigIssue {
    /// Latitude/longitude non-finite or out of bounds.
    LocationOutOfRange {
        /// Offending latitude.
        lat: f64,
        /// Offending longitude.
        lng: f64,
    },
    /// `date` is not `YYYY-MM-DD`.
    InvalidDate(String),
    /// `time` is not `HH:MM`.
    InvalidTime(String),
    /// Title char count.
    TitleTooLong(usize),
    /// Footnote char count.
    FootnoteTooLong(usize),
}

/// Truncate to at most `max` chars (not bytes).
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_owned(),
        None => s.to_owned(),
    }
}

impl ConfigPatch {
    /// `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        self.touched_fields().is_empty()
    }

    /// Wire names of the fields this patch sets.
    pub fn touched_fields(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        let mut mark = |set: bool, name: &'static str| {
            if set {
                out.push(name);
            }
        };
        mark(self.location.is_some(), "location");
        mark(self.date.is_some(), "date");
        mark(self.time.is_some(), "time");
        mark(self.color_theme.is_some(), "colorTheme");
        mark(self.shape_mask.is_some(), "shapeMask");
        mark(self.show_constellations.is_some(), "showConstellations");
        mark(self.show_labels.is_some(), "showLabels");
        mark(self.show_grid.is_some(), "showGrid");
        mark(self.show_milky_way.is_some(), "showMilkyWay");
        mark(self.title.is_some(), "title");
        mark(self.footnote.is_some(), "footnote");
        mark(self.poster_size.is_some(), "posterSize");
        mark(self.show_frame.is_some(), "showFrame");
        out
    }

    /// Apply the input-boundary text limits.
    pub fn limited(mut self) -> Self {
        if let Some(t) = self.title.as_mut() {
            *t = truncate_chars(t, TITLE_MAX_CHARS);
        }
        if let Some(f) = self.footnote.as_mut() {
            *f = truncate_chars(f, FOOTNOTE_MAX_CHARS);
        }
        self
    }

    /// Combine two patches; fields set in `later` win.
    pub fn then(mut self, later: ConfigPatch) -> Self {
        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(if later.$field.is_some() {
                    self.$field = later.$field;
                })*
            };
        }
        take!(
            location,
            date,
            time,
            color_theme,
            shape_mask,
            show_constellations,
            show_labels,
            show_grid,
            show_milky_way,
            title,
            footnote,
            poster_size,
            show_frame,
        );
        self
    }

    /// Decode a JSON object field by field, discarding fields that fail to parse.
    ///
    /// Returns the usable patch and the wire names of discarded fields. A non-object
    /// value yields an empty patch with `"<root>"` reported as discarded.
    pub fn from_json_lenient(value: &serde_json::Value) -> (ConfigPatch, Vec<String>) {
        let mut discarded = Vec::new();
        let Some(obj) = value.as_object() else {
            discarded.push("<root>".to_owned());
            return (ConfigPatch::default(), discarded);
        };

        fn field<T: DeserializeOwned>(
            obj: &serde_json::Map<String, serde_json::Value>,
            key: &str,
            discarded: &mut Vec<String>,
        ) -> Option<T> {
            let v = obj.get(key)?;
            match serde_json::from_value::<T>(v.clone()) {
                Ok(t) => Some(t),
                Err(err) => {
                    tracing::warn!(field = key, %err, "discarding malformed config field");
                    discarded.push(key.to_owned());
                    None
                }
            }
        }

        let d = &mut discarded;
        let patch = ConfigPatch {
            location: field(obj, "location", d),
            date: field(obj, "date", d),
            time: field(obj, "time", d),
            color_theme: field(obj, "colorTheme", d),
            shape_mask: field(obj, "shapeMask", d),
            show_constellations: field(obj, "showConstellations", d),
            show_labels: field(obj, "showLabels", d),
            show_grid: field(obj, "showGrid", d),
            show_milky_way: field(obj, "showMilkyWay", d),
            title: field(obj, "title", d),
            footnote: field(obj, "footnote", d),
            poster_size: field(obj, "posterSize", d),
            show_frame: field(obj, "showFrame", d),
        };
        (patch, discarded)
    }
}

impl From<&DesignerConfig> for ConfigPatch {
    fn from(c: &DesignerConfig) -> Self {
        ConfigPatch {
            location: Some(c.location.clone()),
            date: Some(c.date.clone()),
            time: Some(c.time.clone()),
            color_theme: Some(c.color_theme),
            shape_mask: Some(c.shape_mask),
            show_constellations: Some(c.show_constellations),
            show_labels: Some(c.show_labels),
            show_grid: Some(c.show_grid),
            show_milky_way: Some(c.show_milky_way),
            title: Some(c.title.clone()),
            footnote: Some(c.footnote.clone()),
            poster_size: Some(c.poster_size),
            show_frame: Some(c.show_frame),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
