use super::types::Story;

/// Total number of comments across `items`.
pub fn total_comments(items: &[Story]) -> u64 {
    items.iter().map(|s| s.num_comments).sum()
}
