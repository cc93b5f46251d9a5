mod aggregate;
mod history;
mod session;
mod sort;
mod state;
mod types;

pub use aggregate::total_comments;
pub use history::{derive_recent_searches, RequestHistory, RECENT_SEARCHES_WINDOW};
pub use session::{PendingFetch, SearchSession};
pub use sort::{apply_sort, SortKey, SortState};
pub use state::{FetchState, StoriesAction};
pub use types::{SearchPage, Story};
