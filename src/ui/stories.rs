use crate::app::App;
use crate::stories::{SortKey, SortState};
use crate::util::{relative_age, single_line, truncate_to_width};
use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

/// Column headers with the sort key each one controls and its hotkey.
const COLUMNS: [(&str, SortKey, char); 4] = [
    ("Title", SortKey::Title, 't'),
    ("Author", SortKey::Author, 'a'),
    ("Comments", SortKey::Comment, 'c'),
    ("Points", SortKey::Point, 'p'),
];

/// Header label for a column, with an arrow on the active sort column.
pub(super) fn header_label(label: &str, key: SortKey, sort: SortState) -> String {
    if sort.key != key || key == SortKey::None {
        return label.to_string();
    }
    // Arrow shows the visual direction: ascending text, descending numbers
    let ascending = matches!(key, SortKey::Title | SortKey::Author) != sort.is_reverse;
    format!("{} {}", label, if ascending { '▲' } else { '▼' })
}

/// Render the story table
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let sort = app.session.sort();
    let stories = app.session.sorted_stories();
    let now = chrono::Utc::now();

    let mut header_cells: Vec<Cell> = COLUMNS
        .iter()
        .map(|(label, key, hotkey)| {
            let style = if sort.key == *key {
                app.style("sort_active")
            } else {
                app.style("table_header")
            };
            Cell::from(Line::from(vec![
                Span::styled(header_label(label, *key, sort), style),
                Span::styled(format!(" [{}]", hotkey), app.style("recent_search_key")),
            ]))
        })
        .collect();
    header_cells.push(Cell::from(Span::styled("Age", app.style("table_header"))));

    // Title takes 40% of the inner width; leave 2 columns for borders
    let title_width = (area.width.saturating_sub(2) as usize) * 2 / 5;

    let rows: Vec<Row> = stories
        .iter()
        .map(|story| {
            let title = single_line(&story.title);
            let age = story
                .created_at_i
                .map(|ts| relative_age(ts, now))
                .unwrap_or_default();
            Row::new(vec![
                Cell::from(truncate_to_width(&title, title_width).into_owned()),
                Cell::from(single_line(&story.author).into_owned()),
                Cell::from(story.num_comments.to_string()),
                Cell::from(story.points.to_string()),
                Cell::from(Span::styled(age, app.style("story_meta"))),
            ])
        })
        .collect();

    let widths = [
        Constraint::Percentage(40),
        Constraint::Percentage(30),
        Constraint::Percentage(10),
        Constraint::Percentage(10),
        Constraint::Percentage(10),
    ];

    let title = if stories.is_empty() && !app.session.stories().is_loading {
        " Stories (none) ".to_string()
    } else {
        format!(" Stories ({}) ", stories.len())
    };

    let border_style = if app.search_mode {
        app.style("panel_border")
    } else {
        app.style("panel_border_focused")
    };

    let table = Table::new(rows, widths)
        .header(Row::new(header_cells).bottom_margin(1))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        )
        .style(app.style("story_normal"))
        .row_highlight_style(app.style("story_selected"));

    let mut state = TableState::default();
    if !stories.is_empty() {
        state.select(Some(app.selected.min(stories.len() - 1)));
    }

    f.render_stateful_widget(table, area, &mut state);
}
