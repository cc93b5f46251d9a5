//! Request history and the recent-searches window derived from it.
use crate::search::Locator;

/// Number of past searches offered for replay.
pub const RECENT_SEARCHES_WINDOW: usize = 5;

/// Append-only sequence of issued locators.
///
/// Always holds at least the seed locator; the last element is the active
/// request.
#[derive(Debug, Clone)]
pub struct RequestHistory {
    locators: Vec<Locator>,
}

impl RequestHistory {
    pub fn new(seed: Locator) -> Self {
        Self {
            locators: vec![seed],
        }
    }

    pub fn push(&mut self, locator: Locator) {
        tracing::debug!(url = %locator, len = self.locators.len() + 1, "Locator appended");
        self.locators.push(locator);
    }

    /// The locator that drives the current or next fetch.
    pub fn active(&self) -> &Locator {
        // Non-empty by construction
        &self.locators[self.locators.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.locators.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn locators(&self) -> &[Locator] {
        &self.locators
    }

    pub fn recent_searches(&self) -> Vec<String> {
        derive_recent_searches(&self.locators)
    }
}

/// Distinct recent search terms, oldest first, excluding the active one.
///
/// Consecutive repeats (paging through one search) collapse into one entry,
/// then the last [`RECENT_SEARCHES_WINDOW`] terms before the final one are
/// kept.
pub fn derive_recent_searches(history: &[Locator]) -> Vec<String> {
    let mut terms: Vec<&str> = Vec::with_capacity(history.len());
    for locator in history {
        let term = locator.search_term();
        if terms.last() != Some(&term) {
            terms.push(term);
        }
    }

    let Some(end) = terms.len().checked_sub(1) else {
        return Vec::new();
    };
    let start = end.saturating_sub(RECENT_SEARCHES_WINDOW);

    terms[start..end].iter().map(|t| t.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::API_BASE;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn history_of(terms: &[&str]) -> Vec<Locator> {
        terms
            .iter()
            .map(|t| Locator::new(API_BASE, t, 0))
            .collect()
    }

    #[test]
    fn test_single_locator_has_no_recent_searches() {
        assert!(derive_recent_searches(&history_of(&["React"])).is_empty());
        assert!(derive_recent_searches(&[]).is_empty());
    }

    #[test]
    fn test_active_search_is_excluded() {
        let recent = derive_recent_searches(&history_of(&["React", "Redux"]));
        assert_eq!(recent, vec!["React"]);
    }

    #[test]
    fn test_consecutive_duplicates_collapse() {
        let recent = derive_recent_searches(&history_of(&["A", "A", "B"]));
        assert_eq!(recent, vec!["A"]);

        let recent = derive_recent_searches(&history_of(&["A", "A", "B", "C"]));
        assert_eq!(recent, vec!["A", "B"]);
    }

    #[test]
    fn test_paging_does_not_add_entries() {
        let history = vec![
            Locator::new(API_BASE, "React", 0),
            Locator::new(API_BASE, "React", 1),
            Locator::new(API_BASE, "React", 2),
            Locator::new(API_BASE, "Rust", 0),
        ];
        assert_eq!(derive_recent_searches(&history), vec!["React"]);
    }

    #[test]
    fn test_non_adjacent_repeats_are_kept() {
        let recent = derive_recent_searches(&history_of(&["A", "B", "A", "C"]));
        assert_eq!(recent, vec!["A", "B", "A"]);
    }

    #[test]
    fn test_window_keeps_last_five_before_active() {
        let recent = derive_recent_searches(&history_of(&["a", "b", "c", "d", "e", "f", "g", "h"]));
        assert_eq!(recent, vec!["c", "d", "e", "f", "g"]);
    }

    #[test]
    fn test_history_tracks_active_locator() {
        let mut history = RequestHistory::new(Locator::new(API_BASE, "React", 0));
        assert_eq!(history.len(), 1);
        assert_eq!(history.active().search_term(), "React");

        history.push(Locator::new(API_BASE, "React", 1));
        assert_eq!(history.active().page(), 1);
        assert!(history.recent_searches().is_empty());

        history.push(Locator::new(API_BASE, "JavaScript", 0));
        assert_eq!(history.len(), 3);
        assert_eq!(history.recent_searches(), vec!["React"]);
    }

    proptest! {
        #[test]
        fn prop_distinct_terms_window(n in 2usize..20) {
            let terms: Vec<String> = (0..n).map(|i| format!("term{}", i)).collect();
            let history: Vec<Locator> = terms
                .iter()
                .map(|t| Locator::new(API_BASE, t, 0))
                .collect();

            let recent = derive_recent_searches(&history);

            prop_assert_eq!(recent.len(), RECENT_SEARCHES_WINDOW.min(n - 1));
            let start = n.saturating_sub(RECENT_SEARCHES_WINDOW + 1);
            prop_assert_eq!(&recent[..], &terms[start..n - 1]);
        }

        #[test]
        fn prop_no_adjacent_duplicates(terms in proptest::collection::vec("[ab]", 0..30)) {
            let history: Vec<Locator> = terms
                .iter()
                .map(|t| Locator::new(API_BASE, t, 0))
                .collect();

            let recent = derive_recent_searches(&history);

            prop_assert!(recent.len() <= RECENT_SEARCHES_WINDOW);
            for pair in recent.windows(2) {
                prop_assert_ne!(&pair[0], &pair[1]);
            }
        }
    }
}
