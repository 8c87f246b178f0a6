//! Shareable links: the visual parts of a design carried in a URL query.

use url::Url;

use crate::config::model::{ConfigPatch, DesignerConfig, Location};
use crate::config::theme::{ColorTheme, ShapeMask};
use crate::foundation::error::{StarmapError, StarmapResult};

/// Base used when no explicit share base is configured.
pub const DEFAULT_SHARE_BASE: &str = "https://starmap.local/designer";
/// Name given to a shared location that carries no name.
pub const CUSTOM_LOCATION_NAME: &str = "Custom Location";
/// Title offered to a native share sheet.
pub const SHARE_TITLE: &str = "My Star Map Design";
/// Body offered to a native share sheet.
pub const SHARE_TEXT: &str = "Check out my custom star map!";

/// Everything a share sheet needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SharePayload {
    /// Sheet title.
    pub title: &'static str,
    /// Sheet text.
    pub text: &'static str,
    /// Link to the design.
    pub url: Url,
}

/// Parse a share base URL.
pub fn parse_base(base: &str) -> StarmapResult<Url> {
    Url::parse(base).map_err(|e| StarmapError::serde(format!("invalid share base '{base}': {e}")))
}

/// Link to `config` below `base`. Any query already on `base` is replaced.
///
/// Poster size, overlays and the frame are not carried.
pub fn encode_shareable(base: &Url, config: &DesignerConfig) -> Url {
    let mut url = base.clone();
    url.set_query(None);
    {
        let mut q = url.query_pairs_mut();
        q.append_pair("lat", &config.location.lat.to_string());
        q.append_pair("lng", &config.location.lng.to_string());
        q.append_pair("location", &config.location.name);
        if let Some(tz) = &config.location.timezone {
            q.append_pair("tz", tz);
        }
        q.append_pair("date", &config.date);
        q.append_pair("time", &config.time);
        q.append_pair("theme", config.color_theme.as_str());
        q.append_pair("shape", config.shape_mask.as_str());
        if !config.title.is_empty() {
            q.append_pair("title", &config.title);
        }
        if !config.footnote.is_empty() {
            q.append_pair("footnote", &config.footnote);
        }
    }
    url
}

/// Share sheet contents for `config`.
pub fn share_payload(base: &Url, config: &DesignerConfig) -> SharePayload {
    SharePayload {
        title: SHARE_TITLE,
        text: SHARE_TEXT,
        url: encode_shareable(base, config),
    }
}

/// Patch described by the query of `url`.
///
/// Unknown parameters and values that do not parse are ignored. Location is only
/// applied when both `lat` and `lng` parse as finite numbers; `tz` rides along with it.
pub fn decode_from_url(url: &Url) -> ConfigPatch {
    let mut patch = ConfigPatch::default();
    let mut lat = None;
    let mut lng = None;
    let mut name = None;
    let mut timezone = None;

    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "lat" => lat = parse_coord(&value),
            "lng" => lng = parse_coord(&value),
            "location" => name = Some(value.into_owned()),
            "tz" => timezone = Some(value.into_owned()).filter(|tz| !tz.is_empty()),
            "date" => patch.date = Some(value.into_owned()),
            "time" => patch.time = Some(value.into_owned()),
            "theme" => match ColorTheme::from_name(&value) {
                Some(t) => patch.color_theme = Some(t),
                None => tracing::warn!(theme = %value, "ignoring unknown theme in link"),
            },
            "shape" => match ShapeMask::from_name(&value) {
                Some(s) => patch.shape_mask = Some(s),
                None => tracing::warn!(shape = %value, "ignoring unknown shape in link"),
            },
            "title" => patch.title = Some(value.into_owned()),
            "footnote" => patch.footnote = Some(value.into_owned()),
            other => tracing::debug!(param = other, "ignoring unknown link parameter"),
        }
    }

    if let (Some(lat), Some(lng)) = (lat, lng) {
        let name = name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| CUSTOM_LOCATION_NAME.to_owned());
        let mut location = Location::new(name, lat, lng);
        location.timezone = timezone;
        patch.location = Some(location);
    }
    patch.limited()
}

/// Whether the link carries a `lat` parameter at all.
pub fn has_lat(url: &Url) -> bool {
    url.query_pairs().any(|(k, _)| k == "lat")
}

fn parse_coord(s: &str) -> Option<f64> {
    match s.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            tracing::warn!(value = s, "ignoring malformed coordinate in link");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/persist/share.rs"]
mod tests;
