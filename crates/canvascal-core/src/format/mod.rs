//! Terminal rendering of event views.
//!
//! This module turns [`GroupedEvents`] into the day-by-day agenda and
//! renders the "new assignments" notification list.
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use canvascal_core::format::render_agenda_in;
//! use canvascal_core::group::group_by_day_in;
//!
//! let grouped = group_by_day_in(&[], &Utc);
//! assert_eq!(render_agenda_in(&grouped, &Utc), "No upcoming events found in your calendar.\n");
//! ```

use std::fmt::Display;

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::event::CanvasEvent;
use crate::group::GroupedEvents;
use crate::time::format_time_range_in;

/// Shown in place of the agenda when a fetch returns nothing.
pub const NO_EVENTS_TEXT: &str = "No upcoming events found in your calendar.";

/// Shown in place of the notification list when nothing is new.
pub const NO_NEW_EVENTS_TEXT: &str = "No new assignments.";

/// Badge appended to events flagged as new.
const NEW_BADGE: &str = "[NEW]";

/// The output format for event listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable terminal output.
    #[default]
    Tty,
    /// Machine-readable JSON output.
    Json,
}

/// Renders one event as an indented block.
pub fn render_event_in<Tz>(event: &CanvasEvent, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();

    out.push_str(&format!("  {}", event.summary()));
    if event.is_new() {
        out.push_str(&format!(" {}", NEW_BADGE));
    }
    out.push('\n');

    out.push_str(&format!("    {}", format_time_range_in(&event.start, &event.end, tz)));
    if let Some(location) = event.physical_location() {
        out.push_str(&format!(" @ {}", location));
    }
    out.push('\n');

    if !event.description.is_empty() {
        out.push_str(&format!("    {}\n", event.description));
    }
    out.push_str(&format!("    id: {}\n", event.id));

    out
}

/// Renders the agenda, one section per day, in the given timezone.
pub fn render_agenda_in<Tz>(grouped: &GroupedEvents, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if grouped.is_empty() {
        return format!("{}\n", NO_EVENTS_TEXT);
    }

    let mut out = String::new();
    for (i, group) in grouped.groups().iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{}\n", group.key));
        for event in &group.events {
            out.push_str(&render_event_in(event, tz));
        }
    }
    out
}

/// Renders the agenda in the local timezone.
pub fn render_agenda(grouped: &GroupedEvents) -> String {
    render_agenda_in(grouped, &Local)
}

/// Renders the notification list for recently added events.
pub fn render_notifications(new_events: &[CanvasEvent]) -> String {
    let mut out = format!("New Assignments ({})\n", new_events.len());
    if new_events.is_empty() {
        out.push_str(&format!("  {}\n", NO_NEW_EVENTS_TEXT));
        return out;
    }
    for event in new_events {
        out.push_str(&format!("  - {} [{}]\n", event.summary(), event.id));
    }
    out
}
