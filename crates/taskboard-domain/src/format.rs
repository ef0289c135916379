use chrono::{DateTime, FixedOffset, Offset, Utc};

const DISPLAY_FORMAT: &str = "%d %b %Y, %I:%M %P";

/// Render a timestamp as `05 Mar 2024, 03:45 pm` in the given offset.
/// Out-of-range offsets fall back to UTC.
pub fn format_timestamp(value: DateTime<Utc>, offset_minutes: i32) -> String {
    let offset = offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix());
    value.with_timezone(&offset).format(DISPLAY_FORMAT).to_string()
}
