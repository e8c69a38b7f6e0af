//! The `new` command: recently added assignments.

use canvascal_core::{EventViews, render_notifications};

use crate::error::ClientResult;

/// Prints the notification list.
pub fn run(views: &EventViews) -> ClientResult<()> {
    print!("{}", render_notifications(&views.new_events));
    Ok(())
}
