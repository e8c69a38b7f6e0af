//! Derived views over a fetched event collection.
//!
//! Every fetch replaces the working set, so nothing here is incremental:
//! [`EventViews::build`] recomputes the sorted list, the day grouping and
//! the new-event subset from scratch and hands them out together.

use std::collections::HashMap;
use std::fmt::Display;

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use tracing::debug;

use crate::event::CanvasEvent;
use crate::time::{day_label_in, local_date_in};

/// Trailing window in which a newly added event is surfaced, in hours.
pub const NEW_EVENT_WINDOW_HOURS: i64 = 24;

/// Returns the default trailing window for new events.
pub fn new_event_window() -> Duration {
    Duration::hours(NEW_EVENT_WINDOW_HOURS)
}

/// Events that fall on the same calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayGroup {
    /// Display label, e.g. "Monday, January 1, 2024".
    pub key: String,
    /// The calendar day in the grouping timezone.
    pub date: NaiveDate,
    /// Events of the day in chronological order.
    pub events: Vec<CanvasEvent>,
}

/// Events bucketed by calendar day, buckets in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GroupedEvents {
    groups: Vec<DayGroup>,
}

impl GroupedEvents {
    /// Returns the day groups in order.
    pub fn groups(&self) -> &[DayGroup] {
        &self.groups
    }

    /// Returns the number of day groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Looks up a group by its day label.
    pub fn get(&self, key: &str) -> Option<&DayGroup> {
        self.groups.iter().find(|g| g.key == key)
    }

    /// Returns the day labels in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.key.as_str())
    }

    /// Concatenates all groups back into a single chronological list.
    pub fn flatten(&self) -> Vec<CanvasEvent> {
        self.groups
            .iter()
            .flat_map(|g| g.events.iter().cloned())
            .collect()
    }
}

/// Sorts events by start time.
///
/// The sort is stable: events starting at the same instant keep their
/// relative input order.
pub fn sort_events(events: &[CanvasEvent]) -> Vec<CanvasEvent> {
    let mut sorted = events.to_vec();
    sorted.sort_by_key(|e| e.start);
    sorted
}

/// Sorts events and buckets them by calendar day in the given timezone.
pub fn group_by_day_in<Tz>(events: &[CanvasEvent], tz: &Tz) -> GroupedEvents
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut groups: Vec<DayGroup> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    for event in sort_events(events) {
        let date = local_date_in(&event.start, tz);
        match index.get(&date) {
            Some(&i) => groups[i].events.push(event),
            None => {
                index.insert(date, groups.len());
                groups.push(DayGroup {
                    key: day_label_in(&event.start, tz),
                    date,
                    events: vec![event],
                });
            }
        }
    }

    GroupedEvents { groups }
}

/// Sorts events and buckets them by calendar day in the local timezone.
pub fn group_by_day(events: &[CanvasEvent]) -> GroupedEvents {
    group_by_day_in(events, &Local)
}

/// Selects events added within the default 24 hour window before `now`.
pub fn new_events(events: &[CanvasEvent], now: DateTime<Utc>) -> Vec<CanvasEvent> {
    new_events_within(events, now, new_event_window())
}

/// Selects events whose status is new and whose `added_at` is no older
/// than `window` relative to `now`.
///
/// Input order is preserved.
pub fn new_events_within(
    events: &[CanvasEvent],
    now: DateTime<Utc>,
    window: Duration,
) -> Vec<CanvasEvent> {
    events
        .iter()
        .filter(|e| {
            e.status
                .added_at()
                .is_some_and(|added_at| now - added_at <= window)
        })
        .cloned()
        .collect()
}

/// All views derived from a single fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventViews {
    /// Every event in chronological order.
    pub sorted: Vec<CanvasEvent>,
    /// Events bucketed by calendar day.
    pub grouped: GroupedEvents,
    /// Recently added events, chronological.
    pub new_events: Vec<CanvasEvent>,
}

impl EventViews {
    /// Builds all views in the local timezone with the default new-event window.
    pub fn build(events: &[CanvasEvent], now: DateTime<Utc>) -> Self {
        Self::build_in(events, now, new_event_window(), &Local)
    }

    /// Builds all views with an explicit window and timezone.
    pub fn build_in<Tz>(
        events: &[CanvasEvent],
        now: DateTime<Utc>,
        window: Duration,
        tz: &Tz,
    ) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let sorted = sort_events(events);
        let grouped = group_by_day_in(&sorted, tz);
        let new_events = new_events_within(&sorted, now, window);

        debug!(
            total = sorted.len(),
            days = grouped.len(),
            new = new_events.len(),
            "Built event views"
        );

        Self {
            sorted,
            grouped,
            new_events,
        }
    }

    /// Returns true if the fetch produced no events.
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Finds an event by ID.
    pub fn find(&self, id: &str) -> Option<&CanvasEvent> {
        self.sorted.iter().find(|e| e.id == id)
    }
}
