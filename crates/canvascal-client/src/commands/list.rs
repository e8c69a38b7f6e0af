//! The `list` command: upcoming events grouped by day.

use canvascal_core::{EventViews, OutputFormat, render_agenda};

use crate::error::{ClientError, ClientResult};

/// Prints the agenda.
pub fn run(views: &EventViews, format: OutputFormat) -> ClientResult<()> {
    print!("{}", render(views, format)?);
    Ok(())
}

/// Renders the agenda in the requested format.
pub fn render(views: &EventViews, format: OutputFormat) -> ClientResult<String> {
    match format {
        OutputFormat::Tty => Ok(render_agenda(&views.grouped)),
        OutputFormat::Json => serde_json::to_string_pretty(&views.grouped)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| ClientError::Action(format!("failed to serialize events: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvascal_core::CanvasEvent;
    use chrono::{TimeZone, Utc};

    fn views() -> EventViews {
        let event = CanvasEvent::new(
            "1",
            "Midterm Exam",
            "PSYC 101",
            Utc.with_ymd_and_hms(2024, 10, 26, 14, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 10, 26, 16, 0, 0).unwrap(),
        )
        .unwrap();
        EventViews::build(&[event], Utc::now())
    }

    #[test]
    fn tty_agenda_mentions_event() {
        let out = render(&views(), OutputFormat::Tty).unwrap();
        assert!(out.contains("PSYC 101: Midterm Exam"));
    }

    #[test]
    fn json_is_array_of_groups() {
        let out = render(&views(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let groups = value.as_array().unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0]["events"][0]["id"], "1");
    }

    #[test]
    fn empty_views_show_placeholder() {
        let out = render(&EventViews::default(), OutputFormat::Tty).unwrap();
        assert_eq!(out, "No upcoming events found in your calendar.\n");
    }
}
