//! Calendar file export.
//!
//! Exporting turns events into [`IcsRecord`]s, hands them to an injected
//! [`CalendarEncoder`], wraps the encoded text in a [`Blob`] and pushes it
//! through a [`DownloadTarget`]:
//!
//! ```text
//! [CanvasEvent] ──build_records──▶ [IcsRecord] ──CalendarEncoder──▶ String
//!                                                                    │
//!                     DownloadTarget ◀── ObjectUrl (create/save/revoke) ◀── Blob
//! ```
//!
//! [`CalendarExporter::export`] is the user-facing boundary: failures are
//! reported through a [`Notifier`] and logged, never propagated.

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::event::CanvasEvent;
use crate::time::{DateArray, to_date_array_in};

/// Filename used when the caller does not supply one.
pub const DEFAULT_ICS_FILENAME: &str = "canvas-calendar.ics";

/// Calendar name written into every record.
pub const ICS_CALENDAR_NAME: &str = "Canvas Calendar Export";

/// Product identifier written into every record.
pub const ICS_PRODUCT_ID: &str = "CanvasCalendarExporter";

/// MIME type of the exported blob.
pub const ICS_MIME_TYPE: &str = "text/calendar; charset=utf-8";

/// Minimum time between two user-triggered exports.
pub const EXPORT_COOLDOWN: Duration = Duration::from_secs(1);

/// One event in the shape calendar-file encoders consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IcsRecord {
    /// `"<course>: <title>"`.
    pub title: String,
    /// Description with a course footer.
    pub description: String,
    /// Raw location (the online sentinel is kept).
    pub location: Option<String>,
    /// Local wall-clock start.
    pub start: DateArray,
    /// Local wall-clock end.
    pub end: DateArray,
    /// Calendar name ([`ICS_CALENDAR_NAME`]).
    pub cal_name: String,
    /// Producer identifier ([`ICS_PRODUCT_ID`]).
    pub product_id: String,
}

impl IcsRecord {
    /// Builds a record with wall-clock components in the given timezone.
    pub fn from_event_in<Tz: TimeZone>(event: &CanvasEvent, tz: &Tz) -> Self {
        Self {
            title: event.summary(),
            description: event.export_details(),
            location: event.location.clone(),
            start: to_date_array_in(&event.start, tz),
            end: to_date_array_in(&event.end, tz),
            cal_name: ICS_CALENDAR_NAME.to_string(),
            product_id: ICS_PRODUCT_ID.to_string(),
        }
    }

    /// Builds a record with wall-clock components in the local timezone.
    pub fn from_event(event: &CanvasEvent) -> Self {
        Self::from_event_in(event, &Local)
    }
}

/// Builds one record per event, in the local timezone.
pub fn build_records(events: &[CanvasEvent]) -> Vec<IcsRecord> {
    build_records_in(events, &Local)
}

/// Builds one record per event, in the given timezone.
pub fn build_records_in<Tz: TimeZone>(events: &[CanvasEvent], tz: &Tz) -> Vec<IcsRecord> {
    events
        .iter()
        .map(|e| IcsRecord::from_event_in(e, tz))
        .collect()
}

/// An encoder rejected its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EncodeError {
    message: String,
}

impl EncodeError {
    /// Creates a new encode error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Turns records into calendar file text.
pub trait CalendarEncoder: Send + Sync {
    /// Encodes the records.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError`] if the records cannot be encoded, including
    /// when the list is empty.
    fn encode(&self, records: &[IcsRecord]) -> Result<String, EncodeError>;
}

/// An in-memory payload with a MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    content: Vec<u8>,
    mime_type: String,
}

impl Blob {
    /// Creates a blob.
    pub fn new(content: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Creates a `text/calendar` blob.
    pub fn calendar(text: impl Into<String>) -> Self {
        Self::new(text.into().into_bytes(), ICS_MIME_TYPE)
    }

    /// Returns the payload bytes.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Returns the MIME type.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Returns the payload size in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns true if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Saves blobs to the user's device.
///
/// A blob is first registered under a transient object URL, the URL is
/// saved under a filename, then the URL is revoked. [`ObjectUrl`] drives
/// that sequence and guarantees the revoke.
pub trait DownloadTarget {
    /// Registers a blob and returns a transient reference to it.
    fn create_object_url(&self, blob: &Blob) -> io::Result<String>;

    /// Saves the referenced blob under `filename`, returning where it landed.
    fn save(&self, object_url: &str, filename: &str) -> io::Result<PathBuf>;

    /// Releases a reference obtained from [`create_object_url`](Self::create_object_url).
    fn revoke_object_url(&self, object_url: &str);
}

/// A transient object URL, revoked when dropped.
pub struct ObjectUrl<'a> {
    target: &'a dyn DownloadTarget,
    url: String,
}

impl<'a> ObjectUrl<'a> {
    /// Registers `blob` with `target`.
    pub fn create(target: &'a dyn DownloadTarget, blob: &Blob) -> io::Result<Self> {
        let url = target.create_object_url(blob)?;
        debug!(url = %url, bytes = blob.len(), "Created object URL");
        Ok(Self { target, url })
    }

    /// Returns the URL.
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for ObjectUrl<'_> {
    fn drop(&mut self) {
        self.target.revoke_object_url(&self.url);
        debug!(url = %self.url, "Revoked object URL");
    }
}

/// Receives user-facing failure messages (the blocking alert).
pub trait Notifier {
    /// Shows `message` to the user.
    fn alert(&self, message: &str);
}

/// Why an export failed.
#[derive(Debug, Error)]
pub enum ExportError {
    /// No encoder was injected.
    #[error("calendar encoder is not available")]
    EncoderUnavailable,

    /// The encoder rejected the records.
    #[error("failed to encode calendar: {0}")]
    Encoding(#[from] EncodeError),

    /// The download target failed.
    #[error("failed to save calendar file: {0}")]
    Download(#[source] io::Error),
}

impl ExportError {
    /// Returns the message shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EncoderUnavailable => {
                "Error: Could not generate .ics file because the calendar encoder is not available."
            }
            Self::Encoding(_) => "An error occurred while creating the .ics file.",
            Self::Download(_) => "An error occurred while saving the .ics file.",
        }
    }
}

/// The outcome of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    /// The filename the payload was saved under.
    pub filename: String,
    /// Where the target put it.
    pub saved_to: PathBuf,
    /// Number of events exported.
    pub event_count: usize,
    /// Payload size in bytes.
    pub bytes: usize,
}

/// Exports events as calendar files.
pub struct CalendarExporter {
    encoder: Option<Box<dyn CalendarEncoder>>,
    target: Box<dyn DownloadTarget>,
    notifier: Box<dyn Notifier>,
}

impl CalendarExporter {
    /// Creates an exporter.
    ///
    /// `encoder` may be `None`; every export then fails with
    /// [`ExportError::EncoderUnavailable`].
    pub fn new(
        encoder: Option<Box<dyn CalendarEncoder>>,
        target: Box<dyn DownloadTarget>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            encoder,
            target,
            notifier,
        }
    }

    /// Returns true if an encoder is available.
    pub fn has_encoder(&self) -> bool {
        self.encoder.is_some()
    }

    /// Exports events, reporting failures to the notifier.
    ///
    /// Returns `None` on failure after alerting the user and logging the cause.
    pub fn export(&self, events: &[CanvasEvent], filename: Option<&str>) -> Option<ExportReceipt> {
        match self.try_export(events, filename) {
            Ok(receipt) => Some(receipt),
            Err(err) => {
                error!(error = %err, events = events.len(), "Calendar export failed");
                self.notifier.alert(err.user_message());
                None
            }
        }
    }

    /// Exports events, returning failures to the caller.
    ///
    /// # Errors
    ///
    /// - [`ExportError::EncoderUnavailable`] before any record is built
    /// - [`ExportError::Encoding`] if the encoder rejects the records
    /// - [`ExportError::Download`] if the download target fails
    pub fn try_export(
        &self,
        events: &[CanvasEvent],
        filename: Option<&str>,
    ) -> Result<ExportReceipt, ExportError> {
        let encoder = self
            .encoder
            .as_deref()
            .ok_or(ExportError::EncoderUnavailable)?;
        let filename = filename.unwrap_or(DEFAULT_ICS_FILENAME);

        let records = build_records(events);
        let payload = encoder.encode(&records)?;
        let blob = Blob::calendar(payload);

        let object_url =
            ObjectUrl::create(self.target.as_ref(), &blob).map_err(ExportError::Download)?;
        let saved_to = self
            .target
            .save(object_url.as_str(), filename)
            .map_err(ExportError::Download)?;

        info!(
            filename = %filename,
            events = records.len(),
            bytes = blob.len(),
            "Exported calendar file"
        );

        Ok(ExportReceipt {
            filename: filename.to_string(),
            saved_to,
            event_count: records.len(),
            bytes: blob.len(),
        })
    }
}

/// The "export in progress" flag with a fixed cool-down.
///
/// Rapid re-triggering inside the cool-down is refused; nothing is queued.
///
/// Meant for long-lived front ends that keep one gate per export control.
/// The `canvascal` CLI runs a single export per process and does not use it.
#[derive(Debug, Clone)]
pub struct ExportGate {
    cooldown: Duration,
    busy_until: Option<Instant>,
}

impl Default for ExportGate {
    fn default() -> Self {
        Self::new(EXPORT_COOLDOWN)
    }
}

impl ExportGate {
    /// Creates a gate with the given cool-down.
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            busy_until: None,
        }
    }

    /// Returns true if an export started less than one cool-down ago.
    pub fn is_busy(&self, now: Instant) -> bool {
        self.busy_until.is_some_and(|until| now < until)
    }

    /// Marks an export as started unless the gate is busy.
    pub fn try_begin(&mut self, now: Instant) -> bool {
        if self.is_busy(now) {
            debug!("Export refused during cool-down");
            return false;
        }
        self.busy_until = Some(now + self.cooldown);
        true
    }
}
