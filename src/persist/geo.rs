use crate::config::model::ConfigPatch;
use crate::wizard::steps::{CURRENT_LOCATION_NAME, MomentPatch};

/// Why a position could not be obtained.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GeoError {
    /// The platform has no positioning capability.
    #[error("geolocation is not supported")]
    Unsupported,
    /// The user or platform refused the request.
    #[error("geolocation permission denied")]
    Denied,
    /// Anything else (timeout, no fix).
    #[error("geolocation unavailable: {0}")]
    Unavailable(String),
}

/// Device position source.
pub trait GeoLocator {
    /// One-shot position as `(lat, lng)` degrees.
    fn current_position(&mut self) -> Result<(f64, f64), GeoError>;
}

/// Locator that always answers with the same result.
#[derive(Debug, Clone)]
pub struct FixedLocator(pub Result<(f64, f64), GeoError>);

impl GeoLocator for FixedLocator {
    fn current_position(&mut self) -> Result<(f64, f64), GeoError> {
        self.0.clone()
    }
}

/// Notice shown when a manual "use my location" fails.
pub const DETECT_FAILED_NOTICE: &str = "Failed to detect location. Please enter manually.";
/// Notice shown when positioning is unsupported.
pub const UNSUPPORTED_NOTICE: &str = "Geolocation is not supported by your browser";

/// Result of asking for the device position.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoOutcome {
    /// Position found; apply this patch.
    Located(ConfigPatch),
    /// Position unavailable; keep the current location and show this notice.
    Failed {
        /// Underlying cause.
        error: GeoError,
        /// User-facing message.
        notice: &'static str,
    },
}

/// Query `locator` and turn the answer into a location patch named
/// `"Current Location"`.
pub fn detect(locator: &mut dyn GeoLocator) -> GeoOutcome {
    match locator.current_position() {
        Ok((lat, lng)) => {
            tracing::info!(lat, lng, name = CURRENT_LOCATION_NAME, "position detected");
            GeoOutcome::Located(MomentPatch::detected_position(lat, lng).into_config_patch())
        }
        Err(error) => {
            tracing::warn!(%error, "geolocation failed; keeping current location");
            let notice = match error {
                GeoError::Unsupported => UNSUPPORTED_NOTICE,
                GeoError::Denied | GeoError::Unavailable(_) => DETECT_FAILED_NOTICE,
            };
            GeoOutcome::Failed { error, notice }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/persist/geo.rs"]
mod tests;
