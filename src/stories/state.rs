//! Fetch state machine for the story list.
//!
//! All transitions go through [`FetchState::apply`]. The action set is closed,
//! so an unhandled action is a compile error rather than a runtime failure.
use super::types::{SearchPage, Story};

/// Transitions of the story list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoriesAction {
    /// A request for the active locator was sent.
    FetchInit,
    /// The request resolved with a page of results.
    FetchSuccess(SearchPage),
    /// The request failed at the transport or decode level.
    FetchFailure,
    /// The user dismissed the story with this object ID.
    RemoveStory(String),
}

/// Story list plus the status of the most recent fetch.
///
/// `is_loading` and `is_error` are never both set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchState {
    /// Stories in arrival order, accumulated across pages of one search.
    pub items: Vec<Story>,
    /// Page number of the last successful fetch.
    pub page: u32,
    pub is_loading: bool,
    pub is_error: bool,
}

impl FetchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one transition.
    pub fn apply(&mut self, action: StoriesAction) {
        match action {
            StoriesAction::FetchInit => {
                // Stale items stay visible while the new request is in flight
                self.is_loading = true;
                self.is_error = false;
            }
            StoriesAction::FetchSuccess(SearchPage { hits, page }) => {
                self.is_loading = false;
                self.is_error = false;
                if page == 0 {
                    self.items = hits;
                } else {
                    self.items.extend(hits);
                }
                self.page = page;
            }
            StoriesAction::FetchFailure => {
                self.is_loading = false;
                self.is_error = true;
            }
            StoriesAction::RemoveStory(object_id) => {
                if let Some(pos) = self.items.iter().position(|s| s.object_id == object_id) {
                    self.items.remove(pos);
                }
            }
        }
    }

    /// Consume `self`, apply a transition and return the new state.
    pub fn reduce(mut self, action: StoriesAction) -> Self {
        self.apply(action);
        self
    }
}
