use chrono::{DateTime, FixedOffset, Utc};

const SECONDS_FORMAT: &str = "%Y-%m-%d - %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Current wall-clock time in the tracker's fixed zone.
pub fn now(offset: FixedOffset) -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&offset)
}

/// Second-granularity stamp used for records and console lines.
pub fn stamp(at: &DateTime<FixedOffset>) -> String {
    at.format(SECONDS_FORMAT).to_string()
}

/// Day stamp used in snapshot file names.
pub fn date_stamp(at: &DateTime<FixedOffset>) -> String {
    at.format(DATE_FORMAT).to_string()
}
