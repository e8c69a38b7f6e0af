//! The `google` command: Google Calendar link for one event.

use tracing::info;

use canvascal_core::{EventViews, google_calendar_url};

use crate::error::{ClientError, ClientResult};

/// Prints the link for event `id`, optionally opening or copying it.
pub fn run(views: &EventViews, id: &str, open: bool, copy: bool) -> ClientResult<()> {
    let url = link_for(views, id)?;
    println!("{}", url);

    if open {
        info!(url = %url, "opening Google Calendar link");
        open::that(&url).map_err(|e| ClientError::Action(format!("failed to open URL: {}", e)))?;
    }

    if copy {
        info!("copying Google Calendar link to clipboard");
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| ClientError::Action(format!("failed to access clipboard: {}", e)))?;
        clipboard
            .set_text(&url)
            .map_err(|e| ClientError::Action(format!("failed to copy to clipboard: {}", e)))?;
    }

    Ok(())
}

/// Returns the Google Calendar link for event `id`.
pub fn link_for(views: &EventViews, id: &str) -> ClientResult<String> {
    views
        .find(id)
        .map(google_calendar_url)
        .ok_or_else(|| ClientError::UnknownEvent(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvascal_core::CanvasEvent;
    use chrono::{TimeZone, Utc};

    fn views() -> EventViews {
        let event = CanvasEvent::new(
            "1",
            "Test Event",
            "TEST 101",
            Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 11, 0, 0).unwrap(),
        )
        .unwrap();
        EventViews::build(&[event], Utc::now())
    }

    #[test]
    fn link_for_known_event() {
        let url = link_for(&views(), "1").unwrap();
        assert!(url.starts_with("https://calendar.google.com/calendar/render?action=TEMPLATE"));
        assert!(url.contains("dates=20240101T100000Z%2F20240101T110000Z"));
    }

    #[test]
    fn unknown_event_is_an_error() {
        let err = link_for(&views(), "99").unwrap_err();
        assert!(matches!(err, ClientError::UnknownEvent(ref id) if id == "99"));
    }
}
