//! Presentation helpers shared by every host.

use chrono::{DateTime, Local, TimeZone, Utc};

/// Formats an epoch-millisecond timestamp as `Jan 5, 2024, 3:07 PM` in local time.
pub fn format_timestamp(epoch_ms: i64) -> String {
    format_timestamp_in(epoch_ms, &Local)
}

/// Same as [`format_timestamp`] for an explicit time zone.
pub fn format_timestamp_in<Tz: TimeZone>(epoch_ms: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let utc = DateTime::<Utc>::from_timestamp_millis(epoch_ms).unwrap_or_default();
    utc.with_timezone(tz)
        .format("%b %-d, %Y, %-I:%M %p")
        .to_string()
}
