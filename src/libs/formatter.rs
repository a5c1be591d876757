//! Formatting helpers for log entry text.
//!
//! Every log line is rendered as `[HH:MM:SS] <message>` in local time.

use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

/// Clock format used for the bracketed prefix.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Formats `time` as `HH:MM:SS`.
pub fn format_time<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    time.format(TIME_FORMAT).to_string()
}

/// Builds the text of a log line stamped with `time`.
pub fn format_log_line<Tz: TimeZone>(time: &DateTime<Tz>, message: impl Display) -> String
where
    Tz::Offset: Display,
{
    format!("[{}] {}", format_time(time), message)
}

/// Builds the text of a log line stamped with the current local time.
pub fn format_log_line_now(message: impl Display) -> String {
    format_log_line(&Local::now(), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    #[test]
    fn test_format_log_line_pads_fields() {
        let time = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().and_hms_opt(7, 5, 3).unwrap().and_utc();
        assert_eq!(format_log_line(&time, "Document visible"), "[07:05:03] Document visible");
    }

    #[test]
    fn test_format_time_uses_24_hour_clock() {
        let time = Utc.with_ymd_and_hms(2024, 3, 9, 23, 59, 0).unwrap();
        assert_eq!(format_time(&time), "23:59:00");
    }
}
