//! Google Calendar deep links and export filenames.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use canvascal_core::CanvasEvent;
//! use canvascal_core::links::{google_calendar_url, ics_filename};
//!
//! let event = CanvasEvent::new(
//!     "1",
//!     "Midterm Exam",
//!     "PSYC 101",
//!     Utc.with_ymd_and_hms(2024, 10, 26, 9, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2024, 10, 26, 11, 0, 0).unwrap(),
//! )
//! .unwrap();
//!
//! assert!(google_calendar_url(&event).contains("dates=20241026T090000Z%2F20241026T110000Z"));
//! assert_eq!(ics_filename(&event), "psyc-101-midterm-exam.ics");
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::event::CanvasEvent;
use crate::time::format_compact_utc;

/// Google Calendar "render" endpoint.
pub const GOOGLE_CALENDAR_RENDER_URL: &str = "https://calendar.google.com/calendar/render";

/// Runs of characters that are not ASCII letters or digits.
static NON_ALNUM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]+").expect("Invalid non-alnum regex"));

/// Runs of whitespace.
static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Builds a Google Calendar link that pre-fills a new event.
///
/// The query carries `action=TEMPLATE`, the `"<course>: <title>"` text, the
/// compact UTC `start/end` range, the description with a course footer, and
/// the raw location. Values are percent-encoded.
pub fn google_calendar_url(event: &CanvasEvent) -> String {
    let dates = format!(
        "{}/{}",
        format_compact_utc(&event.start),
        format_compact_utc(&event.end)
    );
    let params = [
        ("action", "TEMPLATE".to_string()),
        ("text", event.summary()),
        ("dates", dates),
        ("details", event.export_details()),
        ("location", event.location.clone().unwrap_or_default()),
    ];

    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", GOOGLE_CALENDAR_RENDER_URL, query)
}

/// Derives the download filename for a single-event export.
///
/// Both parts are lower-cased; the title has every non-alphanumeric run
/// replaced by `-`, the course every whitespace run.
pub fn ics_filename(event: &CanvasEvent) -> String {
    let course = event.course.to_lowercase();
    let course = WHITESPACE_REGEX.replace_all(&course, "-");
    let title = event.title.to_lowercase();
    let title = NON_ALNUM_REGEX.replace_all(&title, "-");
    format!("{}-{}.ics", course, title)
}
