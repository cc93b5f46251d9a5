use crate::keybindings::KeybindingRegistry;
use crate::preferences::PreferenceCell;
use crate::search::FetchError;
use crate::stories::{SearchPage, SearchSession, Story};
use crate::theme::{StyleMap, ThemeVariant};
use ratatui::style::Style;
use std::borrow::Cow;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// How long a status message stays visible.
const STATUS_TTL_SECS: u64 = 3;

// ============================================================================
// Background Events
// ============================================================================

/// Events from background tasks
pub enum AppEvent {
    /// A story page request finished.
    ///
    /// `generation` is the value returned by `SearchSession::begin_fetch`
    /// when the request was spawned; older generations are discarded.
    StoriesFetched {
        generation: u64,
        result: Result<SearchPage, FetchError>,
    },
    /// A background task panicked before producing a result.
    TaskPanicked {
        task: &'static str,
        generation: u64,
        error: String,
    },
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state
pub struct App {
    pub session: SearchSession,
    pub http_client: reqwest::Client,

    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,
    theme_pref: PreferenceCell,

    pub keybindings: KeybindingRegistry,

    /// Index into the sorted story list.
    pub selected: usize,
    /// Keystrokes edit the search term while set.
    pub search_mode: bool,
    pub show_help: bool,
    pub help_scroll_offset: usize,
    pub status_message: Option<(Cow<'static, str>, Instant)>,
    /// Render only when state has changed
    pub needs_redraw: bool,
    pub spinner_frame: usize,

    /// In-flight story request, aborted when a newer one starts.
    pub fetch_handle: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(
        session: SearchSession,
        http_client: reqwest::Client,
        theme_pref: PreferenceCell,
    ) -> Self {
        let theme_variant = ThemeVariant::from_str_name(theme_pref.get()).unwrap_or_else(|| {
            tracing::warn!(theme = %theme_pref.get(), "Unknown theme, using dark");
            ThemeVariant::Dark
        });

        Self {
            session,
            http_client,
            theme_variant,
            theme: StyleMap::from_palette(&theme_variant.palette()),
            theme_pref,
            keybindings: KeybindingRegistry::new(),
            selected: 0,
            search_mode: false,
            show_help: false,
            help_scroll_offset: 0,
            status_message: None,
            needs_redraw: true,
            spinner_frame: 0,
            fetch_handle: None,
        }
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Switch to the next theme and remember it.
    ///
    /// Returns the name of the new theme for status display.
    pub async fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        self.theme_pref.set(&next.name().to_lowercase()).await;
        next.name()
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Story under the cursor, in display order.
    pub fn selected_story(&self) -> Option<&Story> {
        self.session.sorted_stories().get(self.selected).copied()
    }

    pub fn story_count(&self) -> usize {
        self.session.stories().items.len()
    }

    pub fn nav_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn nav_down(&mut self) {
        let max_index = self.story_count().saturating_sub(1);
        self.selected = self.selected.saturating_add(1).min(max_index);
    }

    pub fn nav_top(&mut self) {
        self.selected = 0;
    }

    pub fn nav_bottom(&mut self) {
        self.selected = self.story_count().saturating_sub(1);
    }

    /// Keep the cursor inside the list after it shrinks.
    pub fn clamp_selection(&mut self) {
        let max_index = self.story_count().saturating_sub(1);
        self.selected = self.selected.min(max_index);
    }

    /// Remove the story under the cursor from the current results.
    ///
    /// Returns the dismissed title.
    pub fn dismiss_selected(&mut self) -> Option<String> {
        let (object_id, title) = self
            .selected_story()
            .map(|s| (s.object_id.clone(), s.title.clone()))?;
        self.session.remove_story(&object_id);
        self.clamp_selection();
        tracing::debug!(object_id = %object_id, "Story dismissed");
        Some(title)
    }

    // ========================================================================
    // Status
    // ========================================================================

    /// Set status message (expires after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear the status message if it has expired.
    ///
    /// Returns true if a message was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= STATUS_TTL_SECS {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}

// ============================================================================
// Resource Cleanup
// ============================================================================

/// Abort the in-flight request so it does not outlive the event loop.
impl Drop for App {
    fn drop(&mut self) {
        if let Some(handle) = self.fetch_handle.take() {
            handle.abort();
            tracing::debug!("Aborted fetch task on App drop");
        }
    }
}
