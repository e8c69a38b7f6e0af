//! The `export` command: save events to an `.ics` file.

use std::ffi::OsStr;
use std::path::Path;

use tracing::debug;

use canvascal_core::{
    CalendarEncoder, CalendarExporter, CanvasEvent, EventViews, ExportReceipt, ics_filename,
};

use crate::config::ExportSettings;
use crate::download::{FsDownloadTarget, StderrNotifier};
use crate::error::{ClientError, ClientResult};

/// Exports the selected events (all of them when `ids` is empty).
pub fn run(
    views: &EventViews,
    ids: &[String],
    output: Option<&str>,
    settings: &ExportSettings,
) -> ClientResult<()> {
    if let Some(name) = output {
        check_output_name(name)?;
    }
    let events = select_events(views, ids)?;
    let filename = choose_filename(&events, output, settings);
    debug!(events = events.len(), filename = %filename, "Exporting events");

    let exporter = CalendarExporter::new(
        default_encoder(),
        Box::new(FsDownloadTarget::new(settings.download_dir())),
        Box::new(StderrNotifier),
    );

    let receipt = exporter
        .export(&events, Some(filename.as_str()))
        .ok_or(ClientError::Export)?;
    println!("{}", describe(&receipt));
    Ok(())
}

/// Returns the encoder compiled into this build, if any.
pub fn default_encoder() -> Option<Box<dyn CalendarEncoder>> {
    #[cfg(feature = "ics")]
    {
        Some(Box::new(canvascal_providers::IcalendarEncoder::new()))
    }
    #[cfg(not(feature = "ics"))]
    {
        None
    }
}

/// Resolves `ids` against the views, in chronological order when empty.
pub fn select_events(views: &EventViews, ids: &[String]) -> ClientResult<Vec<CanvasEvent>> {
    if ids.is_empty() {
        return Ok(views.sorted.clone());
    }
    ids.iter()
        .map(|id| {
            views
                .find(id)
                .cloned()
                .ok_or_else(|| ClientError::UnknownEvent(id.clone()))
        })
        .collect()
}

/// Picks the download filename.
///
/// An explicit name wins; a single event is named after its course and
/// title; anything else uses the configured default.
pub fn choose_filename(
    events: &[CanvasEvent],
    output: Option<&str>,
    settings: &ExportSettings,
) -> String {
    match (output, events) {
        (Some(name), _) => name.to_string(),
        (None, [event]) => ics_filename(event),
        _ => settings.default_filename.clone(),
    }
}

/// Rejects `--output` names that would leave the download directory.
fn check_output_name(name: &str) -> ClientResult<()> {
    if Path::new(name).file_name() == Some(OsStr::new(name)) && !name.contains('\\') {
        Ok(())
    } else {
        Err(ClientError::InvalidOutput(name.to_string()))
    }
}

fn describe(receipt: &ExportReceipt) -> String {
    let noun = if receipt.event_count == 1 { "event" } else { "events" };
    format!(
        "Saved {} {} to {}",
        receipt.event_count,
        noun,
        receipt.saved_to.display()
    )
}
