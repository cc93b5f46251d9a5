//! Help overlay: scrollable keybinding table.
//!
//! Shows the live bindings, including any user overrides from config.

use crate::app::App;
use crate::keybindings::{Action, Context};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
    Frame,
};

const CONTEXT_ORDER: [(Context, &str); 2] = [
    (Context::Global, "Stories"),
    (Context::Search, "Search input"),
];

/// Render the help overlay on top of the current view.
pub fn render(f: &mut Frame, app: &App) {
    let overlay = centered_rect(80, 80, f.area());
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }

    f.render_widget(Clear, overlay);

    let bindings = app.keybindings.all_bindings();
    let mut rows: Vec<Row> = Vec::new();

    for (ctx, label) in &CONTEXT_ORDER {
        rows.push(Row::new(vec![
            Line::from(Span::styled(
                format!("-- {} --", label),
                app.style("table_header"),
            )),
            Line::from(""),
        ]));

        let mut replay_keys: Vec<&str> = Vec::new();
        for (c, key_str, action, description) in &bindings {
            if c != ctx {
                continue;
            }
            // Fold the numbered replay slots into one row
            if matches!(action, Action::ReplayRecent(_)) {
                replay_keys.push(key_str);
                continue;
            }
            rows.push(Row::new(vec![
                Line::from(Span::styled(format!("  {}", key_str), app.style("help_key"))),
                Line::from(description.to_string()),
            ]));
        }
        if !replay_keys.is_empty() {
            rows.push(Row::new(vec![
                Line::from(Span::styled(
                    format!("  {}", replay_keys.join(",")),
                    app.style("help_key"),
                )),
                Line::from(Action::ReplayRecent(0).describe()),
            ]));
        }

        rows.push(Row::new(vec![Line::from(""), Line::from("")]));
    }
    rows.pop();

    let total_rows = rows.len();
    let visible_height = overlay.height.saturating_sub(4) as usize; // borders + header
    let max_scroll = total_rows.saturating_sub(visible_height);
    let scroll = app.help_scroll_offset.min(max_scroll);
    let visible_rows: Vec<Row> = rows.into_iter().skip(scroll).take(visible_height).collect();

    let title = if max_scroll > 0 {
        format!(" Help ({}/{}) ", scroll + 1, max_scroll + 1)
    } else {
        " Help (? to close) ".to_string()
    };

    let table = Table::new(
        visible_rows,
        [Constraint::Length(18), Constraint::Min(20)],
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.style("panel_border_focused"))
            .title(title),
    )
    .header(
        Row::new(vec!["Key", "Action"])
            .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
            .bottom_margin(1),
    )
    .style(app.style("story_normal"));

    f.render_widget(table, overlay);

    if scroll < max_scroll {
        let hint_area = Rect {
            x: overlay.x + 1,
            y: overlay.y + overlay.height.saturating_sub(1),
            width: overlay.width.saturating_sub(2),
            height: 1,
        };
        f.render_widget(
            Paragraph::new(Span::styled(
                " j/k to scroll, ? or Esc to close ",
                app.style("story_meta"),
            )),
            hint_area,
        );
    }
}

/// A rectangle covering the given percentage of `area`, centered.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
