//! Date/time helpers for the `date` (`YYYY-MM-DD`) and `time` (`HH:MM`) config strings.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::foundation::error::{StarmapError, StarmapResult};

/// Storage format of [`crate::DesignerConfig::date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Storage format of [`crate::DesignerConfig::time`].
pub const TIME_FORMAT: &str = "%H:%M";

const LONG_DATE_FORMAT: &str = "%B %-d, %Y";

/// Parse an ISO-8601 calendar date.
pub fn parse_date(s: &str) -> StarmapResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| StarmapError::validation(format!("invalid date \"{s}\": {e}")))
}

/// Parse a 24-hour `HH:MM` time.
pub fn parse_time(s: &str) -> StarmapResult<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), TIME_FORMAT)
        .map_err(|e| StarmapError::validation(format!("invalid time \"{s}\": {e}")))
}

/// Combine the config strings into the observation moment (local wall-clock time).
pub fn parse_moment(date: &str, time: &str) -> StarmapResult<NaiveDateTime> {
    Ok(parse_date(date)?.and_time(parse_time(time)?))
}

/// `"June 15, 2024"`.
pub fn long_date(date: NaiveDate) -> String {
    date.format(LONG_DATE_FORMAT).to_string()
}

/// Poster caption: long date followed by the 24-hour time, e.g. `"June 15, 2024, 20:00"`.
///
/// Unparsable inputs fall back to the raw strings so that a bad value never blocks
/// the composite.
pub fn caption(date: &str, time: &str) -> String {
    match parse_moment(date, time) {
        Ok(dt) => format!("{}, {}", long_date(dt.date()), dt.format(TIME_FORMAT)),
        Err(err) => {
            tracing::debug!(%err, "caption falls back to raw date/time");
            format!("{} {}", date.trim(), time.trim()).trim().to_owned()
        }
    }
}

/// Format a date the way it is stored in the config.
pub fn date_string(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Format a time the way it is stored in the config (minutes precision).
pub fn time_string(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Today's date on the local clock, in storage format.
pub fn today() -> String {
    date_string(chrono::Local::now().date_naive())
}

/// Current local time, in storage format.
pub fn now() -> String {
    time_string(chrono::Local::now().time())
}

#[cfg(test)]
#[path = "../../tests/unit/config/moment.rs"]
mod tests;
