//! Render functions for the TUI.
//!
//! One screen: search input, recent searches, story table, fetch footer and
//! status bar, with the help overlay drawn on top when active.

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::loop_runner::SPINNER_FRAMES;
use super::{help, search, status, stories};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 60;
pub(super) const MIN_HEIGHT: u16 = 10;

const SPINNER: [char; SPINNER_FRAMES] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Main render function.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    search::render_input(f, app, chunks[0]);
    search::render_recent(f, app, chunks[1]);
    stories::render(f, app, chunks[2]);
    render_fetch_footer(f, app, chunks[3]);
    status::render(f, app, chunks[4]);

    if app.show_help {
        help::render(f, app);
    }
}

/// Text segments and style roles for the line below the story table.
///
/// Loading replaces the "More" button so a second page cannot be requested
/// while one is in flight. After a failure the button stays next to the
/// error so the page can be requested again.
pub(super) fn fetch_footer(app: &App) -> Vec<(String, &'static str)> {
    let state = app.session.stories();
    if state.is_loading {
        let frame = SPINNER[app.spinner_frame % SPINNER_FRAMES];
        return vec![(format!("{} Loading ...", frame), "loading")];
    }

    let more = (
        format!("[m] More (page {})", state.page.saturating_add(2)),
        "more_button",
    );
    if state.is_error {
        vec![("Something went wrong ...  ".to_string(), "error"), more]
    } else {
        vec![more]
    }
}

fn render_fetch_footer(f: &mut Frame, app: &App, area: Rect) {
    let spans: Vec<Span> = fetch_footer(app)
        .into_iter()
        .map(|(text, role)| Span::styled(text, app.style(role)))
        .collect();
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}
