//! Application event handling.
//!
//! Applies background fetch results to the session.

use crate::app::{App, AppEvent};

/// Handle application events from background tasks.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::StoriesFetched { generation, result } => {
            let failed = result.is_err();
            if !app.session.complete_fetch(generation, result) {
                return;
            }
            if failed {
                app.set_status("Something went wrong fetching stories");
            }
            app.fetch_handle = None;
            app.clamp_selection();
        }
        AppEvent::TaskPanicked {
            task,
            generation,
            error,
        } => {
            tracing::error!(task, generation, error, "Background task panicked");
            if app.session.abandon_fetch(generation) {
                app.fetch_handle = None;
                app.set_status(format!("Internal error in {} task", task));
            }
        }
    }
}
