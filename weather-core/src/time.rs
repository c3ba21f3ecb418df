use chrono::{DateTime, Local, NaiveDateTime};

/// Layout of the `dt_txt` field in OpenWeather forecast entries.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an upstream `YYYY-MM-DD HH:MM:SS` string.
///
/// Returns `None` for anything that does not match the layout exactly.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).ok()
}

/// Date-only label for a forecast entry.
///
/// Uses the parsed timestamp when there is one, otherwise the first
/// whitespace-delimited token of the raw string.
pub fn date_label(raw: &str, parsed: Option<&NaiveDateTime>) -> String {
    match parsed {
        Some(ts) => ts.format(DATE_FORMAT).to_string(),
        None => raw.split_whitespace().next().unwrap_or_default().to_string(),
    }
}

/// Convert upstream epoch seconds (sunrise, sunset) into local time.
pub fn epoch_to_local(secs: i64) -> Option<DateTime<Local>> {
    DateTime::from_timestamp(secs, 0).map(|utc| utc.with_timezone(&Local))
}
