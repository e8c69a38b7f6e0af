//! Date formatting for calendar exports and display.
//!
//! The two export encodings use different clocks:
//! - [`format_compact_utc`]: `YYYYMMDDTHHMMSSZ`, always rendered in UTC (Google Calendar links)
//! - [`DateArray`]: `(year, month, day, hour, minute)` in the local timezone (`.ics` encoder)
//!
//! Downstream consumers depend on exactly this pairing, so neither side is
//! converted to match the other.
//!
//! Functions that depend on the display timezone come in two flavours: an
//! `_in` variant generic over [`TimeZone`], and a convenience wrapper that
//! uses [`Local`].

use std::fmt::Display;

use chrono::{
    DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc,
};
use serde::{Deserialize, Serialize};

/// Format string for the compact UTC encoding.
const COMPACT_UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Format string for calendar-day group labels ("Monday, January 1, 2024").
const DAY_LABEL_FORMAT: &str = "%A, %B %-d, %Y";

/// Format string for clock times ("9:00 AM").
const CLOCK_FORMAT: &str = "%-I:%M %p";

/// Events whose duration is at most this many seconds are shown as "All Day".
pub const ALL_DAY_THRESHOLD_SECS: i64 = 60;

/// A point in time broken into local wall-clock components.
///
/// Serializes as a five-element array `[year, month, day, hour, minute]`
/// with a 1-indexed month, the shape calendar-file encoders expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateArray(pub i32, pub u32, pub u32, pub u32, pub u32);

impl DateArray {
    /// Returns the calendar year.
    pub fn year(&self) -> i32 {
        self.0
    }

    /// Returns the month (1-12).
    pub fn month(&self) -> u32 {
        self.1
    }

    /// Returns the day of month.
    pub fn day(&self) -> u32 {
        self.2
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.3
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.4
    }

    /// Converts back into a naive (floating) datetime.
    ///
    /// Returns `None` if the components do not form a valid date and time.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.0, self.1, self.2)?.and_hms_opt(self.3, self.4, 0)
    }
}

/// Formats a timestamp as `YYYYMMDDTHHMMSSZ` in UTC.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use canvascal_core::time::format_compact_utc;
///
/// let dt = Utc.with_ymd_and_hms(2024, 7, 29, 18, 30, 0).unwrap();
/// assert_eq!(format_compact_utc(&dt), "20240729T183000Z");
/// ```
pub fn format_compact_utc(dt: &DateTime<Utc>) -> String {
    dt.format(COMPACT_UTC_FORMAT).to_string()
}

/// Parses a compact UTC timestamp produced by [`format_compact_utc`].
pub fn parse_compact_utc(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s.trim(), COMPACT_UTC_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Breaks a timestamp into wall-clock components in the given timezone.
pub fn to_date_array_in<Tz: TimeZone>(dt: &DateTime<Utc>, tz: &Tz) -> DateArray {
    let local = dt.with_timezone(tz);
    DateArray(
        local.year(),
        local.month(),
        local.day(),
        local.hour(),
        local.minute(),
    )
}

/// Breaks a timestamp into wall-clock components in the host's local timezone.
pub fn to_date_array(dt: &DateTime<Utc>) -> DateArray {
    to_date_array_in(dt, &Local)
}

/// Returns the calendar day of a timestamp in the given timezone.
pub fn local_date_in<Tz: TimeZone>(dt: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    dt.with_timezone(tz).date_naive()
}

/// Formats the long day label used to group events ("Monday, January 1, 2024").
pub fn day_label_in<Tz>(dt: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    dt.with_timezone(tz).format(DAY_LABEL_FORMAT).to_string()
}

/// Formats the long day label in the host's local timezone.
pub fn day_label(dt: &DateTime<Utc>) -> String {
    day_label_in(dt, &Local)
}

/// Returns true if the span is short enough to be treated as a point deadline.
pub fn is_instantaneous(start: &DateTime<Utc>, end: &DateTime<Utc>) -> bool {
    *end - *start <= Duration::seconds(ALL_DAY_THRESHOLD_SECS)
}

/// Formats the time span of an event for display.
///
/// Point deadlines render as `"All Day"`, everything else as
/// `"9:00 AM - 11:00 AM"`.
pub fn format_time_range_in<Tz>(start: &DateTime<Utc>, end: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if is_instantaneous(start, end) {
        return "All Day".to_string();
    }
    format!(
        "{} - {}",
        start.with_timezone(tz).format(CLOCK_FORMAT),
        end.with_timezone(tz).format(CLOCK_FORMAT)
    )
}
