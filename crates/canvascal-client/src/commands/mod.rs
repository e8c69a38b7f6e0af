//! Subcommand implementations.

pub mod config;
pub mod export;
pub mod google;
pub mod list;
pub mod new;

use chrono::{DateTime, Duration, Local, Utc};
use tracing::{debug, error};

use canvascal_core::EventViews;
use canvascal_providers::EventSource;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Fetches events from the configured source and derives all views.
pub async fn load_views(config: &ClientConfig) -> ClientResult<EventViews> {
    let window = config.display.new_window().map_err(ClientError::Config)?;
    let source = config
        .source
        .build()
        .map_err(|e| ClientError::Config(e.message().to_string()))?;
    fetch_views(source.as_ref(), Utc::now(), window).await
}

/// Fetches events from `source` and derives all views as of `now`.
///
/// A failed fetch yields no views at all.
pub async fn fetch_views(
    source: &dyn EventSource,
    now: DateTime<Utc>,
    window: Duration,
) -> ClientResult<EventViews> {
    let events = source.fetch_events().await.map_err(|e| {
        error!(source = source.name(), error = %e, "Failed to fetch calendar events");
        ClientError::from(e)
    })?;
    debug!(source = source.name(), count = events.len(), "Fetched events");

    Ok(EventViews::build_in(&events, now, window, &Local))
}
