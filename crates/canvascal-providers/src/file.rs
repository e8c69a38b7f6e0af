//! JSON file event source.
//!
//! Reads a JSON array of wire events (`id`, `title`, `start`, `end`,
//! `course`, `description`, `location`, `isNew`, `addedAt`) from disk.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use canvascal_core::{CanvasEvent, WireEvent};

use crate::error::{ProviderError, ProviderResult};
use crate::source::{BoxFuture, EventSource};

/// An [`EventSource`] backed by a JSON export on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Creates a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSource for JsonFileSource {
    fn name(&self) -> &str {
        "file"
    }

    fn fetch_events(&self) -> BoxFuture<'_, ProviderResult<Vec<CanvasEvent>>> {
        Box::pin(async move {
            debug!(path = %self.path.display(), "Reading events file");
            let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
                ProviderError::from_io(e, format!("cannot read {}", self.path.display()))
                    .with_provider("file")
            })?;
            parse_events(&content).map_err(|e| e.with_provider("file"))
        })
    }
}

/// Parses a JSON array of wire events.
///
/// The whole document is rejected if any event is malformed.
pub fn parse_events(content: &str) -> ProviderResult<Vec<CanvasEvent>> {
    let wire: Vec<WireEvent> = serde_json::from_str(content).map_err(|e| {
        warn!(error = %e, "Failed to parse events JSON");
        ProviderError::invalid_response("events file is not a valid event list").with_source(e)
    })?;

    wire.into_iter()
        .map(|w| {
            let id = w.id.clone();
            CanvasEvent::try_from(w).map_err(|e| {
                ProviderError::invalid_response(format!("event {} is invalid", id)).with_source(e)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;
    use std::io::Write;

    const EVENTS_JSON: &str = r#"[
        {
            "id": "1",
            "title": "Psychology 101 Midterm Exam",
            "start": "2024-10-26T14:00:00Z",
            "end": "2024-10-26T16:00:00Z",
            "course": "PSYC 101",
            "description": "Midterm exam covering chapters 1-5.",
            "location": "Main Auditorium, Room 201",
            "isNew": false
        },
        {
            "id": "5",
            "title": "Calculus II Quiz",
            "start": "2024-10-29T13:00:00Z",
            "end": "2024-10-29T13:45:00Z",
            "course": "MATH 221",
            "isNew": true,
            "addedAt": "2024-10-24T15:00:00Z"
        }
    ]"#;

    #[test]
    fn parses_wire_events() {
        let events = parse_events(EVENTS_JSON).unwrap();
        assert_eq!(events.len(), 2);
        assert!(!events[0].is_new());
        assert!(events[1].is_new());
        assert_eq!(events[1].description, "");
        assert!(events[1].location.is_none());
    }

    #[test]
    fn empty_list_is_fine() {
        assert!(parse_events("[]").unwrap().is_empty());
    }

    #[test]
    fn malformed_json_is_invalid_response() {
        let err = parse_events("{not json").unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::InvalidResponse);
    }

    #[test]
    fn backwards_event_rejects_document() {
        let json = r#"[{
            "id": "bad",
            "title": "Backwards",
            "start": "2024-10-26T16:00:00Z",
            "end": "2024-10-26T14:00:00Z",
            "course": "X 1"
        }]"#;
        let err = parse_events(json).unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::InvalidResponse);
        assert!(err.message().contains("bad"));
    }

    #[tokio::test]
    async fn reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(EVENTS_JSON.as_bytes()).unwrap();

        let source = JsonFileSource::new(file.path());
        assert_eq!(source.path(), file.path());

        let events = source.fetch_events().await.unwrap();
        assert_eq!(events.len(), 2);
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonFileSource::new(dir.path().join("missing.json"));

        let err = source.fetch_events().await.unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::NotFound);
        assert_eq!(err.provider(), Some("file"));
    }
}
