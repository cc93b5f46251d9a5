//! Helper functions for UI operations.
//!
//! Background fetch spawning and panic capture for spawned tasks.

use crate::app::{App, AppEvent};
use crate::search::fetch_page;
use crate::util::{story_link, validate_link_for_open};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;

/// Wraps a future to catch panics and convert them to errors.
///
/// A panic inside a spawned task would otherwise vanish into the runtime and
/// leave the story list stuck in its loading state.
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            }
        })
}

/// Start the request for the active locator if one is pending.
///
/// Aborts the previous request first. The new task reports back with
/// `AppEvent::StoriesFetched`, tagged with the session generation.
pub(super) fn spawn_pending_fetch(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    let Some(pending) = app.session.begin_fetch() else {
        return;
    };

    if let Some(handle) = app.fetch_handle.take() {
        handle.abort();
        tracing::debug!("Aborted previous fetch task");
    }

    let client = app.http_client.clone();
    let tx = event_tx.clone();
    let generation = pending.generation;
    app.needs_redraw = true;

    app.fetch_handle = Some(tokio::spawn(async move {
        let tx_panic = tx.clone();
        match catch_task_panic(async move {
            let result = fetch_page(&client, &pending.locator).await;
            if let Err(e) = tx
                .send(AppEvent::StoriesFetched { generation, result })
                .await
            {
                tracing::warn!(error = %e, event = "StoriesFetched", "Channel send failed (receiver dropped)");
            }
        })
        .await
        {
            Ok(()) => {}
            Err(panic_msg) => {
                tracing::error!(task = "fetch", generation, error = %panic_msg, "Background task panicked");
                let _ = tx_panic
                    .send(AppEvent::TaskPanicked {
                        task: "fetch",
                        generation,
                        error: panic_msg,
                    })
                    .await;
            }
        }
    }));
}

/// Open the selected story's link in the system browser.
pub(super) fn open_selected_story(app: &mut App) {
    let Some(link) = app.selected_story().map(story_link) else {
        app.set_status("No story selected");
        return;
    };

    // Only http(s) reaches the system opener
    if let Err(e) = validate_link_for_open(&link) {
        app.set_status(format!("Cannot open link: {}", e));
    } else if let Err(e) = open::that(&link) {
        tracing::warn!(link = %link, error = %e, "Failed to open browser");
        app.set_status(format!("Failed to open browser: {}", e));
    } else {
        app.set_status("Opened in browser");
    }
}
