//! Event sources and calendar encoders.
//!
//! This crate provides the collaborators the core is wired to:
//!
//! - [`EventSource`] - The trait every event backend implements
//! - [`MockCanvasSource`] - Canned course events relative to "today"
//! - [`JsonFileSource`] - Events read from a JSON file of wire events
//! - [`IcalendarEncoder`] - A [`CalendarEncoder`](canvascal_core::CalendarEncoder) backed by the `icalendar` crate
//! - [`ProviderError`] - Error types for fetch operations
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐    ┌──────────────────┐
//! │ MockCanvasSource │    │  JsonFileSource  │
//! └────────┬─────────┘    └────────┬─────────┘
//!          │                       │
//!          │      EventSource      │
//!          └───────────┬───────────┘
//!                      │
//!                      ▼
//!              ┌───────────────┐
//!              │ [CanvasEvent] │
//!              └───────┬───────┘
//!                      │
//!                      ▼ EventViews::build()
//!              ┌───────────────┐
//!              │  EventViews   │
//!              └───────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use canvascal_providers::{EventSource, MockCanvasSource};
//!
//! async fn load(source: &dyn EventSource) -> Vec<CanvasEvent> {
//!     source.fetch_events().await?
//! }
//! ```

pub mod error;
pub mod file;
#[cfg(feature = "ics")]
pub mod ics;
pub mod mock;
pub mod source;

// Re-export main types at crate root
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use file::JsonFileSource;
#[cfg(feature = "ics")]
pub use ics::IcalendarEncoder;
pub use mock::{MOCK_FETCH_DELAY, MockCanvasSource, mock_events_in};
pub use source::{BoxFuture, ErrorSource, EventSource};
