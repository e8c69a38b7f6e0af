//! Event types for course calendar events.
//!
//! This module provides core types for representing calendar events:
//! - [`CanvasEvent`]: A course event (lecture, exam, assignment deadline)
//! - [`EventStatus`]: Whether the event was recently added to the course calendar
//! - [`WireEvent`]: The camelCase JSON shape delivered by event sources

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::time;

/// Location sentinel meaning the event has no physical location.
pub const ONLINE_SUBMISSION: &str = "Online Submission";

/// Errors raised when constructing an event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// The end timestamp precedes the start timestamp.
    #[error("event {id} ends before it starts")]
    EndBeforeStart {
        /// The offending event ID.
        id: String,
    },
}

/// Whether an event was recently added by the event source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EventStatus {
    /// Nothing new about this event.
    #[default]
    Seen,
    /// The event was added at the given instant.
    New {
        /// When the event appeared in the source.
        added_at: DateTime<Utc>,
    },
}

impl EventStatus {
    /// Returns true for [`EventStatus::New`].
    pub fn is_new(&self) -> bool {
        matches!(self, Self::New { .. })
    }

    /// Returns the time the event was added, if it is new.
    pub fn added_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::New { added_at } => Some(*added_at),
            Self::Seen => None,
        }
    }
}

/// A single course calendar event.
///
/// Events are immutable once received from a source; derived views
/// (sorted lists, day groups, new-event subsets) are built from clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasEvent {
    /// Opaque identifier, stable across fetches.
    pub id: String,
    /// The event title.
    pub title: String,
    /// The course name or code (e.g. "PSYC 101").
    pub course: String,
    /// Free-text description.
    pub description: String,
    /// Where the event happens, if anywhere.
    pub location: Option<String>,
    /// When the event starts.
    pub start: DateTime<Utc>,
    /// When the event ends (never before `start`).
    pub end: DateTime<Utc>,
    /// Recency status.
    pub status: EventStatus,
}

impl CanvasEvent {
    /// Creates a new event, checking that `end >= start`.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        course: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, EventError> {
        let id = id.into();
        if end < start {
            return Err(EventError::EndBeforeStart { id });
        }
        Ok(Self {
            id,
            title: title.into(),
            course: course.into(),
            description: String::new(),
            location: None,
            start,
            end,
            status: EventStatus::Seen,
        })
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to mark the event as newly added.
    pub fn with_added_at(mut self, added_at: DateTime<Utc>) -> Self {
        self.status = EventStatus::New { added_at };
        self
    }

    /// Returns true if the event is a point deadline (lasts a minute or less).
    pub fn is_all_day(&self) -> bool {
        time::is_instantaneous(&self.start, &self.end)
    }

    /// Returns true if the event was flagged as new by its source.
    pub fn is_new(&self) -> bool {
        self.status.is_new()
    }

    /// Returns the location only if it names a physical place.
    pub fn physical_location(&self) -> Option<&str> {
        self.location
            .as_deref()
            .filter(|loc| !loc.is_empty() && *loc != ONLINE_SUBMISSION)
    }

    /// Returns the duration of the event.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns `"<course>: <title>"`, the summary used by every export.
    pub fn summary(&self) -> String {
        format!("{}: {}", self.course, self.title)
    }

    /// Returns the description followed by a course footer.
    pub fn export_details(&self) -> String {
        format!("{}\n\nCourse: {}", self.description, self.course)
    }
}

/// The JSON shape event sources deliver.
///
/// Recency arrives as an `isNew` flag plus an optional `addedAt`. Only the
/// combination of both is meaningful; converting into [`CanvasEvent`]
/// collapses anything else to [`EventStatus::Seen`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub course: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub is_new: Option<bool>,
    #[serde(default)]
    pub added_at: Option<DateTime<Utc>>,
}

impl TryFrom<WireEvent> for CanvasEvent {
    type Error = EventError;

    fn try_from(wire: WireEvent) -> Result<Self, Self::Error> {
        let mut event = CanvasEvent::new(wire.id, wire.title, wire.course, wire.start, wire.end)?
            .with_description(wire.description);
        event.location = wire.location;
        if let (Some(true), Some(added_at)) = (wire.is_new, wire.added_at) {
            event.status = EventStatus::New { added_at };
        }
        Ok(event)
    }
}

impl From<&CanvasEvent> for WireEvent {
    fn from(event: &CanvasEvent) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            start: event.start,
            end: event.end,
            course: event.course.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            is_new: Some(event.is_new()),
            added_at: event.status.added_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn sample_event() -> CanvasEvent {
        CanvasEvent::new(
            "1",
            "Midterm Exam",
            "PSYC 101",
            utc(2024, 10, 26, 9, 0, 0),
            utc(2024, 10, 26, 11, 0, 0),
        )
        .unwrap()
        .with_description("Midterm covering chapters 1-5.")
        .with_location("Room 201")
    }

    mod canvas_event {
        use super::*;

        #[test]
        fn basic_creation() {
            let event = sample_event();
            assert_eq!(event.id, "1");
            assert_eq!(event.duration(), Duration::hours(2));
            assert!(!event.is_all_day());
            assert!(!event.is_new());
            assert_eq!(event.status, EventStatus::Seen);
        }

        #[test]
        fn rejects_end_before_start() {
            let err = CanvasEvent::new(
                "bad",
                "Backwards",
                "X 1",
                utc(2024, 1, 2, 0, 0, 0),
                utc(2024, 1, 1, 0, 0, 0),
            )
            .unwrap_err();
            assert_eq!(err, EventError::EndBeforeStart { id: "bad".into() });
        }

        #[test]
        fn zero_length_is_allowed_and_all_day() {
            let at = utc(2024, 1, 1, 23, 59, 0);
            let event = CanvasEvent::new("d", "Essay Due", "ENG 250", at, at).unwrap();
            assert!(event.is_all_day());
        }

        #[test]
        fn summary_and_details() {
            let event = sample_event();
            assert_eq!(event.summary(), "PSYC 101: Midterm Exam");
            assert_eq!(
                event.export_details(),
                "Midterm covering chapters 1-5.\n\nCourse: PSYC 101"
            );
        }

        #[test]
        fn physical_location_hides_sentinel() {
            assert_eq!(sample_event().physical_location(), Some("Room 201"));
            assert_eq!(
                sample_event()
                    .with_location(ONLINE_SUBMISSION)
                    .physical_location(),
                None
            );
            assert_eq!(sample_event().with_location("").physical_location(), None);
        }

        #[test]
        fn new_status() {
            let added = utc(2024, 10, 25, 8, 0, 0);
            let event = sample_event().with_added_at(added);
            assert!(event.is_new());
            assert_eq!(event.status.added_at(), Some(added));
        }

        #[test]
        fn serde_roundtrip() {
            let event = sample_event().with_added_at(utc(2024, 10, 25, 8, 0, 0));
            let json = serde_json::to_string(&event).unwrap();
            let parsed: CanvasEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(event, parsed);
        }
    }

    mod wire_event {
        use super::*;

        #[test]
        fn parses_camel_case() {
            let json = r#"{
                "id": "5",
                "title": "Calculus II Quiz",
                "start": "2024-03-05T09:00:00Z",
                "end": "2024-03-05T09:45:00Z",
                "course": "MATH 221",
                "description": "Quiz on integration techniques.",
                "location": "Science Building, Room S112",
                "isNew": true,
                "addedAt": "2024-03-01T12:00:00Z"
            }"#;
            let wire: WireEvent = serde_json::from_str(json).unwrap();
            let event = CanvasEvent::try_from(wire).unwrap();
            assert_eq!(
                event.status,
                EventStatus::New {
                    added_at: utc(2024, 3, 1, 12, 0, 0)
                }
            );
            assert_eq!(
                event.location.as_deref(),
                Some("Science Building, Room S112")
            );
        }

        #[test]
        fn new_without_timestamp_is_seen() {
            let json = r#"{
                "id": "7",
                "title": "Pop Quiz 2",
                "start": "2024-03-05T11:00:00Z",
                "end": "2024-03-05T11:20:00Z",
                "course": "PSYC 101",
                "isNew": true
            }"#;
            let wire: WireEvent = serde_json::from_str(json).unwrap();
            let event = CanvasEvent::try_from(wire).unwrap();
            assert_eq!(event.status, EventStatus::Seen);
            assert!(event.description.is_empty());
            assert!(event.location.is_none());
        }

        #[test]
        fn timestamp_without_flag_is_seen() {
            let wire = WireEvent {
                is_new: Some(false),
                added_at: Some(utc(2024, 3, 1, 12, 0, 0)),
                ..WireEvent::from(&sample_event())
            };
            let event = CanvasEvent::try_from(wire).unwrap();
            assert!(!event.is_new());
        }

        #[test]
        fn invalid_range_is_rejected() {
            let wire = WireEvent {
                end: utc(2024, 10, 26, 8, 0, 0),
                ..WireEvent::from(&sample_event())
            };
            assert!(CanvasEvent::try_from(wire).is_err());
        }

        #[test]
        fn conversion_back_and_forth() {
            let event = sample_event().with_added_at(utc(2024, 10, 25, 8, 0, 0));
            let wire = WireEvent::from(&event);
            assert_eq!(wire.is_new, Some(true));
            assert_eq!(CanvasEvent::try_from(wire).unwrap(), event);
        }
    }
}
