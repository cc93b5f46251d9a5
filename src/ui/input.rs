//! Input handling for the TUI.
//!
//! Keys are resolved through the keybinding registry; in search mode,
//! unbound printable keys edit the search term.

use crate::app::{App, AppEvent};
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crate::stories::SortKey;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::helpers::{open_selected_story, spawn_pending_fetch};
use super::Action;

/// Maximum search term length accepted from the keyboard
pub(super) const MAX_SEARCH_LENGTH: usize = 256;

/// Main input dispatch function.
pub(super) async fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    // Help overlay captures all keys while visible
    if app.show_help {
        handle_help_input(app, code);
        return Ok(Action::Continue);
    }

    // Shifted characters already arrive cased ('T', '?')
    let modifiers = if matches!(code, KeyCode::Char(_)) {
        modifiers.difference(KeyModifiers::SHIFT)
    } else {
        modifiers
    };

    let action = if app.search_mode {
        handle_search_input(app, code, modifiers).await
    } else {
        handle_browse_input(app, code, modifiers).await
    };

    // Any intent above may have appended a locator
    spawn_pending_fetch(app, event_tx);
    Ok(action)
}

/// Handle input while the help overlay is visible.
fn handle_help_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
}

/// Handle input while the search term is being edited.
async fn handle_search_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    match app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Search)
    {
        Some(KbAction::Quit) => return Action::Quit,
        Some(KbAction::ExitSearch) => app.search_mode = false,
        Some(KbAction::SubmitSearch) => submit_search(app),
        Some(_) => {}
        None => match code {
            KeyCode::Backspace => {
                let mut term = app.session.search_term().to_string();
                term.pop();
                app.session.set_search_input(&term).await;
            }
            KeyCode::Char(c)
                if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                if app.session.search_term().chars().count() >= MAX_SEARCH_LENGTH {
                    app.set_status(format!(
                        "Search term too long (max {} chars)",
                        MAX_SEARCH_LENGTH
                    ));
                } else {
                    let mut term = app.session.search_term().to_string();
                    term.push(c);
                    app.session.set_search_input(&term).await;
                }
            }
            _ => {}
        },
    }
    Action::Continue
}

/// Submit the current term. An empty term cannot be submitted.
fn submit_search(app: &mut App) {
    if app.session.search_term().is_empty() {
        app.set_status("Type a search term first");
        return;
    }
    app.session.submit_search();
    app.search_mode = false;
    app.selected = 0;
}

/// Handle input on the story list.
async fn handle_browse_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    let Some(action) = app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Global)
    else {
        return Action::Continue;
    };

    match action {
        KbAction::Quit => return Action::Quit,
        KbAction::NavDown => app.nav_down(),
        KbAction::NavUp => app.nav_up(),
        KbAction::NavTop => app.nav_top(),
        KbAction::NavBottom => app.nav_bottom(),
        KbAction::Back => app.status_message = None,
        KbAction::EnterSearch => app.search_mode = true,
        KbAction::ExitSearch => app.search_mode = false,
        KbAction::SubmitSearch => submit_search(app),
        KbAction::LoadMore => {
            if !app.session.load_more() {
                app.set_status("Already loading...");
            }
        }
        KbAction::Dismiss => {
            if let Some(title) = app.dismiss_selected() {
                app.set_status(format!("Dismissed: {}", title));
            }
        }
        KbAction::SortTitle => app.session.set_sort_key(SortKey::Title),
        KbAction::SortAuthor => app.session.set_sort_key(SortKey::Author),
        KbAction::SortComments => app.session.set_sort_key(SortKey::Comment),
        KbAction::SortPoints => app.session.set_sort_key(SortKey::Point),
        KbAction::ReplayRecent(slot) => {
            let recent = app.session.recent_searches();
            if let Some(term) = recent.get(usize::from(slot)) {
                app.session.replay_search(term).await;
                app.selected = 0;
            }
        }
        KbAction::OpenInBrowser => open_selected_story(app),
        KbAction::CycleTheme => {
            let name = app.cycle_theme().await;
            app.set_status(format!("Theme: {}", name));
        }
        KbAction::ShowHelp => app.show_help = true,
    }
    Action::Continue
}
