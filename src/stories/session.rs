//! Search session: request history, story list and sort state behind one
//! set of user intents.
//!
//! Each intent that issues a request appends a locator to the history. The
//! driver (UI loop or print mode) then calls [`SearchSession::begin_fetch`],
//! performs the request, and hands the outcome to
//! [`SearchSession::complete_fetch`].
//!
//! Every started fetch carries a generation number. Only the completion for
//! the newest generation is applied; an older one that resolves late is
//! dropped so it cannot overwrite the results of a newer search.
use crate::preferences::PreferenceCell;
use crate::search::{FetchError, Locator};

use super::aggregate::total_comments;
use super::history::RequestHistory;
use super::sort::{apply_sort, SortKey, SortState};
use super::state::{FetchState, StoriesAction};
use super::types::{SearchPage, Story};

/// A request that the driver should perform now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    pub generation: u64,
    pub locator: Locator,
}

pub struct SearchSession {
    api_base: String,
    search_term: PreferenceCell,
    history: RequestHistory,
    stories: FetchState,
    sort: SortState,
    /// Generation of the most recently started fetch (0 = none yet).
    generation: u64,
    /// History length when the last fetch was started.
    dispatched_len: usize,
}

impl SearchSession {
    /// Start a session seeded with page 0 of the current search term.
    pub fn new(api_base: impl Into<String>, search_term: PreferenceCell) -> Self {
        let api_base = api_base.into();
        let seed = Locator::new(&api_base, search_term.get(), 0);
        tracing::info!(term = %search_term.get(), "Search session started");

        Self {
            api_base,
            search_term,
            history: RequestHistory::new(seed),
            stories: FetchState::new(),
            sort: SortState::default(),
            generation: 0,
            dispatched_len: 0,
        }
    }

    // ========================================================================
    // State
    // ========================================================================

    pub fn stories(&self) -> &FetchState {
        &self.stories
    }

    pub fn history(&self) -> &RequestHistory {
        &self.history
    }

    pub fn search_term(&self) -> &str {
        self.search_term.get()
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn recent_searches(&self) -> Vec<String> {
        self.history.recent_searches()
    }

    pub fn total_comments(&self) -> u64 {
        total_comments(&self.stories.items)
    }

    /// Current stories in display order.
    pub fn sorted_stories(&self) -> Vec<&Story> {
        apply_sort(&self.stories.items, self.sort)
    }

    // ========================================================================
    // Intents
    // ========================================================================

    /// Replace the search input, persisting it immediately.
    pub async fn set_search_input(&mut self, term: &str) {
        self.search_term.set(term).await;
    }

    /// Search for the current input term from page 0.
    ///
    /// The term is not validated here; the caller must not submit an empty
    /// term.
    pub fn submit_search(&mut self) {
        let term = self.search_term.get().to_string();
        self.push_search(&term, 0);
    }

    /// Make `term` the input term again and search for it from page 0.
    pub async fn replay_search(&mut self, term: &str) {
        self.search_term.set(term).await;
        self.push_search(term, 0);
    }

    /// Request the page after the last one received for the active search.
    ///
    /// Returns `false` and does nothing while a fetch is loading.
    pub fn load_more(&mut self) -> bool {
        if self.stories.is_loading {
            tracing::debug!("Ignoring load more while a fetch is in flight");
            return false;
        }
        let term = self.history.active().search_term().to_string();
        let next_page = self.stories.page.saturating_add(1);
        self.push_search(&term, next_page);
        true
    }

    pub fn remove_story(&mut self, object_id: &str) {
        self.stories
            .apply(StoriesAction::RemoveStory(object_id.to_string()));
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort.select(key);
        tracing::debug!(key = ?self.sort.key, reverse = self.sort.is_reverse, "Sort changed");
    }

    fn push_search(&mut self, term: &str, page: u32) {
        self.history.push(Locator::new(&self.api_base, term, page));
    }

    // ========================================================================
    // Fetch protocol
    // ========================================================================

    /// Start a fetch for the active locator if it changed since the last one.
    ///
    /// Applies [`StoriesAction::FetchInit`] and returns the request to make,
    /// tagged with a fresh generation.
    pub fn begin_fetch(&mut self) -> Option<PendingFetch> {
        if self.dispatched_len == self.history.len() {
            return None;
        }
        self.dispatched_len = self.history.len();
        self.generation = self.generation.wrapping_add(1);
        self.stories.apply(StoriesAction::FetchInit);

        let locator = self.history.active().clone();
        tracing::debug!(generation = self.generation, url = %locator, "Fetch started");
        Some(PendingFetch {
            generation: self.generation,
            locator,
        })
    }

    /// Apply the outcome of the fetch started as `generation`.
    ///
    /// Returns `false` if a newer fetch has started since; the outcome is then
    /// discarded.
    pub fn complete_fetch(
        &mut self,
        generation: u64,
        outcome: Result<SearchPage, FetchError>,
    ) -> bool {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "Discarding stale fetch result"
            );
            return false;
        }

        match outcome {
            Ok(page) => {
                tracing::info!(page = page.page, hits = page.hits.len(), "Stories loaded");
                self.stories.apply(StoriesAction::FetchSuccess(page));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Story fetch failed");
                self.stories.apply(StoriesAction::FetchFailure);
            }
        }
        true
    }

    /// Mark the fetch started as `generation` failed without an outcome
    /// (the task carrying it died).
    pub fn abandon_fetch(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.stories.apply(StoriesAction::FetchFailure);
        true
    }
}
