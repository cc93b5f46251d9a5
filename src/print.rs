//! Non-interactive output: fetch pages of the stored search and write them
//! as a plain-text table.
use crate::search::fetch_page;
use crate::stories::{SearchSession, Story};
use crate::util::{single_line, truncate_to_width};
use std::io::{self, Write};

const TITLE_WIDTH: usize = 60;
const AUTHOR_WIDTH: usize = 16;

/// Fetch up to `pages` pages of the active search into `session`.
///
/// Paging stops at the first empty page or the first failure. A failed page
/// leaves the stories already received in place. Returns `false` if a fetch
/// failed.
pub async fn fetch_pages(
    session: &mut SearchSession,
    client: &reqwest::Client,
    pages: u32,
) -> bool {
    for n in 0..pages.max(1) {
        if n > 0 && !session.load_more() {
            break;
        }
        let Some(pending) = session.begin_fetch() else {
            break;
        };
        let result = fetch_page(client, &pending.locator).await;
        let exhausted = matches!(&result, Ok(page) if page.hits.is_empty());
        session.complete_fetch(pending.generation, result);

        if session.stories().is_error {
            return false;
        }
        if exhausted {
            break;
        }
    }
    true
}

/// Write the sorted stories and the comment total.
pub fn write_table<W: Write>(session: &SearchSession, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{:<tw$}  {:<aw$}  {:>8}  {:>6}",
        "Title",
        "Author",
        "Comments",
        "Points",
        tw = TITLE_WIDTH,
        aw = AUTHOR_WIDTH
    )?;
    for story in session.sorted_stories() {
        writeln!(out, "{}", format_row(story))?;
    }
    writeln!(out)?;
    writeln!(out, "Total comments: {}", session.total_comments())
}

fn format_row(story: &Story) -> String {
    let title = single_line(&story.title);
    let author = single_line(&story.author);
    format!(
        "{:<tw$}  {:<aw$}  {:>8}  {:>6}",
        truncate_to_width(&title, TITLE_WIDTH),
        truncate_to_width(&author, AUTHOR_WIDTH),
        story.num_comments,
        story.points,
        tw = TITLE_WIDTH,
        aw = AUTHOR_WIDTH
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story(title: &str) -> Story {
        Story {
            object_id: "1".to_string(),
            title: title.to_string(),
            url: String::new(),
            author: "pg".to_string(),
            num_comments: 12,
            points: 340,
            created_at_i: None,
        }
    }

    #[test]
    fn test_format_row_flattens_and_aligns() {
        let row = format_row(&story("Line one\nline two"));
        assert!(row.starts_with("Line one line two"));
        assert!(row.ends_with("      12     340"));
    }

    #[test]
    fn test_format_row_truncates_long_title() {
        let row = format_row(&story(&"x".repeat(100)));
        assert!(row.contains('…'));
        assert!(!row.contains(&"x".repeat(TITLE_WIDTH)));
    }
}
