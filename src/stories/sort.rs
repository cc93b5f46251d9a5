//! Column sorting for the story list.
use super::types::Story;
use std::cmp::Reverse;

/// Column the story list is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Arrival order.
    #[default]
    None,
    Title,
    Author,
    Comment,
    Point,
}

impl SortKey {
    /// Parse a key name as given on the command line.
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "title" => Some(Self::Title),
            "author" => Some(Self::Author),
            "comment" | "comments" => Some(Self::Comment),
            "point" | "points" => Some(Self::Point),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Title => "Title",
            Self::Author => "Author",
            Self::Comment => "Comments",
            Self::Point => "Points",
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub is_reverse: bool,
}

impl SortState {
    pub fn new(key: SortKey, is_reverse: bool) -> Self {
        Self { key, is_reverse }
    }

    /// Select a column: re-selecting the active one flips direction, a new
    /// one starts in its default direction.
    pub fn select(&mut self, key: SortKey) {
        self.is_reverse = self.key == key && !self.is_reverse;
        self.key = key;
    }
}

/// Order `items` by `sort`.
///
/// Title and author sort ascending, comments and points descending (most
/// first). Ties keep their input order. `is_reverse` reverses the finished
/// result.
pub fn apply_sort(items: &[Story], sort: SortState) -> Vec<&Story> {
    let mut sorted: Vec<&Story> = items.iter().collect();

    // slice::sort_by and sort_by_key are stable
    match sort.key {
        SortKey::None => {}
        SortKey::Title => sorted.sort_by(|a, b| a.title.cmp(&b.title)),
        SortKey::Author => sorted.sort_by(|a, b| a.author.cmp(&b.author)),
        SortKey::Comment => sorted.sort_by_key(|s| Reverse(s.num_comments)),
        SortKey::Point => sorted.sort_by_key(|s| Reverse(s.points)),
    }

    if sort.is_reverse {
        sorted.reverse();
    }
    sorted
}
