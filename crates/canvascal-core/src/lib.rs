//! Core types: events, time formatting, grouping, links, calendar export

pub mod event;
pub mod export;
pub mod format;
pub mod group;
pub mod links;
pub mod time;
pub mod tracing;

pub use event::{CanvasEvent, EventError, EventStatus, ONLINE_SUBMISSION, WireEvent};
pub use export::{
    Blob, CalendarEncoder, CalendarExporter, DEFAULT_ICS_FILENAME, DownloadTarget, EncodeError,
    ExportError, ExportGate, ExportReceipt, ICS_CALENDAR_NAME, ICS_MIME_TYPE, ICS_PRODUCT_ID,
    IcsRecord, Notifier, ObjectUrl, build_records,
};
pub use format::{OutputFormat, render_agenda, render_notifications};
pub use group::{
    DayGroup, EventViews, GroupedEvents, group_by_day, new_event_window, new_events,
    sort_events,
};
pub use links::{google_calendar_url, ics_filename};
pub use time::{DateArray, format_compact_utc, to_date_array};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
