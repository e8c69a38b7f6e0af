//! Mock Canvas event source.
//!
//! Produces a fixed set of course events scheduled relative to the current
//! day, after a simulated network delay. Two of them are flagged as recently
//! added so the notification list has something to show.

use std::time::Duration;

use chrono::{DateTime, Days, Local, NaiveDate, TimeZone, Utc};
use tracing::debug;

use canvascal_core::{CanvasEvent, ONLINE_SUBMISSION};

use crate::error::{ProviderError, ProviderResult};
use crate::source::{BoxFuture, EventSource};

/// Simulated latency of a mock fetch.
pub const MOCK_FETCH_DELAY: Duration = Duration::from_millis(1500);

struct MockEntry {
    id: &'static str,
    title: &'static str,
    course: &'static str,
    description: &'static str,
    location: &'static str,
    days_ahead: u64,
    hour: u32,
    minute: u32,
    duration_minutes: i64,
    added_minutes_ago: Option<i64>,
}

const MOCK_ENTRIES: &[MockEntry] = &[
    MockEntry {
        id: "1",
        title: "Psychology 101 Midterm Exam",
        course: "PSYC 101",
        description: "Midterm exam covering chapters 1-5. Bring a #2 pencil and a calculator.",
        location: "Main Auditorium, Room 201",
        days_ahead: 2,
        hour: 10,
        minute: 0,
        duration_minutes: 120,
        added_minutes_ago: None,
    },
    MockEntry {
        id: "2",
        title: "Assignment 3: Essay Draft Due",
        course: "ENG 250: Advanced Composition",
        description: "Submit the first draft of your research essay on the assigned topic. 5-7 pages.",
        location: ONLINE_SUBMISSION,
        days_ahead: 4,
        hour: 23,
        minute: 59,
        duration_minutes: 1,
        added_minutes_ago: None,
    },
    MockEntry {
        id: "3",
        title: "Project Presentation",
        course: "CS 480: Software Engineering",
        description: "Group presentation for the final project. Each group has 15 minutes.",
        location: "Engineering Hall, Room E304",
        days_ahead: 7,
        hour: 14,
        minute: 0,
        duration_minutes: 90,
        added_minutes_ago: None,
    },
    MockEntry {
        id: "4",
        title: "History Lecture: The Roman Empire",
        course: "HIST 110: Ancient Civilizations",
        description: "Lecture focusing on the fall of the Western Roman Empire.",
        location: "Lecture Hall B",
        days_ahead: 2,
        hour: 13,
        minute: 0,
        duration_minutes: 50,
        added_minutes_ago: None,
    },
    MockEntry {
        id: "5",
        title: "Calculus II Quiz",
        course: "MATH 221",
        description: "Quiz on integration techniques.",
        location: "Science Building, Room S112",
        days_ahead: 5,
        hour: 9,
        minute: 0,
        duration_minutes: 45,
        added_minutes_ago: Some(0),
    },
    MockEntry {
        id: "6",
        title: "Final Project Milestone 2 Due",
        course: "CS 480: Software Engineering",
        description: "Submit the implementation and testing phase documentation.",
        location: ONLINE_SUBMISSION,
        days_ahead: 10,
        hour: 17,
        minute: 0,
        duration_minutes: 1,
        added_minutes_ago: None,
    },
    MockEntry {
        id: "7",
        title: "Pop Quiz 2",
        course: "PSYC 101",
        description: "A surprise pop quiz on last week's readings.",
        location: "Main Auditorium, Room 201",
        days_ahead: 3,
        hour: 11,
        minute: 0,
        duration_minutes: 20,
        added_minutes_ago: Some(120),
    },
];

/// An [`EventSource`] serving canned course events.
#[derive(Debug, Clone)]
pub struct MockCanvasSource {
    delay: Duration,
}

impl Default for MockCanvasSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCanvasSource {
    /// Creates a mock source with the default simulated delay.
    pub fn new() -> Self {
        Self {
            delay: MOCK_FETCH_DELAY,
        }
    }

    /// Builder method to set the simulated delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the simulated delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl EventSource for MockCanvasSource {
    fn name(&self) -> &str {
        "mock"
    }

    fn fetch_events(&self) -> BoxFuture<'_, ProviderResult<Vec<CanvasEvent>>> {
        Box::pin(async move {
            debug!(delay_ms = self.delay.as_millis() as u64, "Fetching mock calendar events");
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            mock_events_in(Utc::now(), &Local).map_err(|e| e.with_provider("mock"))
        })
    }
}

/// Builds the mock events for the day containing `now` in `tz`.
///
/// Start times are wall-clock times in `tz`; "added" timestamps are
/// relative to `now`.
///
/// # Errors
///
/// Returns an internal error if a scheduled wall-clock time does not exist
/// in `tz` (a DST gap).
pub fn mock_events_in<Tz: TimeZone>(
    now: DateTime<Utc>,
    tz: &Tz,
) -> ProviderResult<Vec<CanvasEvent>> {
    let today = now.with_timezone(tz).date_naive();

    MOCK_ENTRIES
        .iter()
        .map(|entry| {
            let start = wall_clock(today, entry, tz)?;
            let end = start + chrono::Duration::minutes(entry.duration_minutes);

            let mut event = CanvasEvent::new(entry.id, entry.title, entry.course, start, end)
                .map_err(|e| ProviderError::internal("invalid mock event").with_source(e))?
                .with_description(entry.description)
                .with_location(entry.location);
            if let Some(minutes) = entry.added_minutes_ago {
                event = event.with_added_at(now - chrono::Duration::minutes(minutes));
            }
            Ok(event)
        })
        .collect()
}

fn wall_clock<Tz: TimeZone>(
    today: NaiveDate,
    entry: &MockEntry,
    tz: &Tz,
) -> ProviderResult<DateTime<Utc>> {
    let naive = today
        .checked_add_days(Days::new(entry.days_ahead))
        .and_then(|day| day.and_hms_opt(entry.hour, entry.minute, 0))
        .ok_or_else(|| ProviderError::internal(format!("event {} is out of range", entry.id)))?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            ProviderError::internal(format!(
                "event {} starts at {} which does not exist locally",
                entry.id, naive
            ))
        })
}
