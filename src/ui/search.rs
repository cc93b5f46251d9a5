use crate::app::App;
use crate::util::{display_width, single_line, truncate_to_width};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the search input box.
pub fn render_input(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let term = app.session.search_term();
    let (title, input_style, border_style) = if app.search_mode {
        (
            " Search (Enter to submit, Esc to leave) ",
            app.style("search_input_active"),
            app.style("panel_border_focused"),
        )
    } else {
        (
            " Search (/ to edit) ",
            app.style("search_input"),
            app.style("panel_border"),
        )
    };

    let mut spans = vec![Span::styled(term.to_string(), input_style)];
    if app.search_mode {
        spans.push(Span::styled("_", input_style));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );
    f.render_widget(paragraph, area);

    if app.search_mode {
        // Place the terminal cursor after the typed text
        let x = area.x + 1 + (display_width(term) as u16).min(area.width - 3);
        f.set_cursor_position((x, area.y + 1));
    }
}

/// Recent-search line: numbered replay slots on the left, comment total on
/// the right.
pub fn render_recent(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let total = format!("Total comments: {}", app.session.total_comments());
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(total.len() as u16 + 1),
        ])
        .split(area);

    let recent = app.session.recent_searches();
    let mut spans = vec![Span::styled("Recent: ", app.style("story_meta"))];
    if recent.is_empty() {
        spans.push(Span::styled("none yet", app.style("story_meta")));
    }
    for (i, term) in recent.iter().enumerate() {
        spans.push(Span::styled(
            format!("[{}]", i + 1),
            app.style("recent_search_key"),
        ));
        spans.push(Span::styled(
            format!("{}  ", truncate_to_width(&single_line(term), 24)),
            app.style("recent_search"),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);
    f.render_widget(
        Paragraph::new(Span::styled(total, app.style("total_comments")))
            .alignment(ratatui::layout::Alignment::Right),
        chunks[1],
    );
}
