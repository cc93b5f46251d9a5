//! Keybinding registry: maps actions to key events with config overrides.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

use crate::stories::RECENT_SEARCHES_WINDOW;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NavDown,
    NavUp,
    NavTop,
    NavBottom,
    Back,
    EnterSearch,
    ExitSearch,
    SubmitSearch,
    LoadMore,
    Dismiss,
    SortTitle,
    SortAuthor,
    SortComments,
    SortPoints,
    /// Replay the recent search at this 0-based slot.
    ReplayRecent(u8),
    OpenInBrowser,
    CycleTheme,
    ShowHelp,
}

impl Action {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit application",
            Self::NavDown => "Navigate down",
            Self::NavUp => "Navigate up",
            Self::NavTop => "Jump to first story",
            Self::NavBottom => "Jump to last story",
            Self::Back => "Go back / dismiss",
            Self::EnterSearch => "Edit search term",
            Self::ExitSearch => "Leave search input",
            Self::SubmitSearch => "Run search",
            Self::LoadMore => "Load more stories",
            Self::Dismiss => "Dismiss story",
            Self::SortTitle => "Sort by title",
            Self::SortAuthor => "Sort by author",
            Self::SortComments => "Sort by comments",
            Self::SortPoints => "Sort by points",
            Self::ReplayRecent(_) => "Replay recent search",
            Self::OpenInBrowser => "Open story in browser",
            Self::CycleTheme => "Cycle theme",
            Self::ShowHelp => "Show help",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context: determines which bindings are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    Search,
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Whether the search input would receive this key as text.
    pub fn is_text(&self) -> bool {
        matches!(self.code, KeyCode::Char(_))
            && self.modifiers.difference(KeyModifiers::SHIFT).is_empty()
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Supported formats:
/// - Single char: "q", "j", "/"
/// - Named keys: "Enter", "Esc", "Tab", "Up", "Down", "Home", "End"
/// - Modifier combos: "Ctrl+d"
/// - Function keys: "F1" through "F12"
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let mut chars = rest.trim().chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        return Some(KeySpec::ctrl(c));
    }

    match s.to_lowercase().as_str() {
        "enter" | "return" => return Some(KeySpec::plain(KeyCode::Enter)),
        "esc" | "escape" => return Some(KeySpec::plain(KeyCode::Esc)),
        "tab" => return Some(KeySpec::plain(KeyCode::Tab)),
        "up" => return Some(KeySpec::plain(KeyCode::Up)),
        "down" => return Some(KeySpec::plain(KeyCode::Down)),
        "home" => return Some(KeySpec::plain(KeyCode::Home)),
        "end" => return Some(KeySpec::plain(KeyCode::End)),
        "backspace" => return Some(KeySpec::plain(KeyCode::Backspace)),
        "space" => return Some(KeySpec::plain(KeyCode::Char(' '))),
        _ => {}
    }

    if let Some(n) = s.strip_prefix(['F', 'f']) {
        if let Ok(n) = n.parse::<u8>() {
            if (1..=12).contains(&n) {
                return Some(KeySpec::plain(KeyCode::F(n)));
            }
        }
    }

    let mut chars = s.chars();
    let c = chars.next()?;
    if chars.next().is_none() {
        return Some(KeySpec::plain(KeyCode::Char(c)));
    }

    None
}

/// Format a KeySpec as a human-readable string for the help screen.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Registry of keybindings, supporting default bindings and config overrides.
///
/// The same key can map to different actions in different contexts.
pub struct KeybindingRegistry {
    lookup: HashMap<(Context, KeySpec), Action>,
    /// All bindings in registration order, for the help screen
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        registry.register_defaults();
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    fn bind_char(&mut self, context: Context, c: char, action: Action) {
        self.bind(context, KeySpec::plain(KeyCode::Char(c)), action);
    }

    fn register_defaults(&mut self) {
        use Context::{Global, Search};

        // === Story list ===
        self.bind_char(Global, 'q', Action::Quit);
        self.bind(Global, KeySpec::ctrl('c'), Action::Quit);

        self.bind_char(Global, 'j', Action::NavDown);
        self.bind(Global, KeySpec::plain(KeyCode::Down), Action::NavDown);
        self.bind_char(Global, 'k', Action::NavUp);
        self.bind(Global, KeySpec::plain(KeyCode::Up), Action::NavUp);
        self.bind_char(Global, 'g', Action::NavTop);
        self.bind(Global, KeySpec::plain(KeyCode::Home), Action::NavTop);
        self.bind_char(Global, 'G', Action::NavBottom);
        self.bind(Global, KeySpec::plain(KeyCode::End), Action::NavBottom);

        self.bind(Global, KeySpec::plain(KeyCode::Esc), Action::Back);

        self.bind_char(Global, '/', Action::EnterSearch);
        self.bind_char(Global, 'm', Action::LoadMore);
        self.bind_char(Global, 'd', Action::Dismiss);

        self.bind_char(Global, 't', Action::SortTitle);
        self.bind_char(Global, 'a', Action::SortAuthor);
        self.bind_char(Global, 'c', Action::SortComments);
        self.bind_char(Global, 'p', Action::SortPoints);

        for slot in 0..RECENT_SEARCHES_WINDOW as u8 {
            let digit = char::from(b'1' + slot);
            self.bind_char(Global, digit, Action::ReplayRecent(slot));
        }

        self.bind_char(Global, 'o', Action::OpenInBrowser);
        self.bind(Global, KeySpec::plain(KeyCode::Enter), Action::OpenInBrowser);
        self.bind_char(Global, 'T', Action::CycleTheme);
        self.bind_char(Global, '?', Action::ShowHelp);

        // === Search input ===
        // Printable characters are typed into the input, so only
        // non-character keys are bound here.
        self.bind(Search, KeySpec::plain(KeyCode::Esc), Action::ExitSearch);
        self.bind(Search, KeySpec::plain(KeyCode::Enter), Action::SubmitSearch);
        self.bind(Search, KeySpec::ctrl('c'), Action::Quit);
    }

    /// Apply user overrides from the config keybindings map.
    ///
    /// Keys in the map are action names (e.g., "quit", "load_more").
    /// Values are key strings (e.g., "q", "Ctrl+d", "F5").
    ///
    /// Returns a list of warnings for unrecognized action names or unparseable keys.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (action_name, key_str) in overrides {
            let action = match parse_action_name(action_name) {
                Some(a) => a,
                None => {
                    warnings.push(format!("Unknown action '{}', ignoring", action_name));
                    continue;
                }
            };

            let key = match parse_key_string(key_str) {
                Some(k) => k,
                None => {
                    warnings.push(format!(
                        "Cannot parse key '{}' for action '{}', ignoring",
                        key_str, action_name
                    ));
                    continue;
                }
            };

            let mut contexts_for_action: Vec<Context> = self
                .bindings
                .iter()
                .filter(|(_, _, a)| *a == action)
                .map(|(c, _, _)| *c)
                .collect();
            contexts_for_action.dedup();

            // A text key cannot be bound in Search; the action keeps its
            // existing Search binding instead
            let text_key = key.is_text();
            let keep = move |ctx: &Context, a: &Action| {
                *a != action || (text_key && *ctx == Context::Search)
            };
            self.lookup.retain(|(ctx, _), a| keep(ctx, a));
            self.bindings.retain(|(ctx, _, a)| keep(ctx, a));

            for ctx in contexts_for_action {
                if text_key && ctx == Context::Search {
                    continue;
                }
                self.bind(ctx, key, action);
            }

            tracing::info!(
                action = %action_name,
                key = %key_str,
                "Applied keybinding override"
            );
        }

        warnings
    }

    /// Look up the action for a key in a context.
    ///
    /// Search is modal: it never falls back to Global bindings, so letters
    /// typed into the search box are not treated as commands.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        self.lookup
            .get(&(context, KeySpec::new(code, modifiers)))
            .copied()
    }

    /// Bindings for the help screen as (context, key, action, description).
    pub fn all_bindings(&self) -> Vec<(Context, String, Action, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, format_key(key), *action, action.describe()))
            .collect()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an action name string (from config) into an Action.
fn parse_action_name(name: &str) -> Option<Action> {
    let name = name.to_lowercase();
    if let Some(slot) = name.strip_prefix("replay_") {
        let n = slot.parse::<u8>().ok()?;
        if (1..=RECENT_SEARCHES_WINDOW as u8).contains(&n) {
            return Some(Action::ReplayRecent(n - 1));
        }
        return None;
    }

    match name.as_str() {
        "quit" => Some(Action::Quit),
        "nav_down" | "down" => Some(Action::NavDown),
        "nav_up" | "up" => Some(Action::NavUp),
        "nav_top" | "top" => Some(Action::NavTop),
        "nav_bottom" | "bottom" => Some(Action::NavBottom),
        "back" => Some(Action::Back),
        "enter_search" | "search" => Some(Action::EnterSearch),
        "exit_search" => Some(Action::ExitSearch),
        "submit_search" | "submit" => Some(Action::SubmitSearch),
        "load_more" | "more" => Some(Action::LoadMore),
        "dismiss" => Some(Action::Dismiss),
        "sort_title" => Some(Action::SortTitle),
        "sort_author" => Some(Action::SortAuthor),
        "sort_comments" => Some(Action::SortComments),
        "sort_points" => Some(Action::SortPoints),
        "open_in_browser" | "open" => Some(Action::OpenInBrowser),
        "cycle_theme" | "theme" => Some(Action::CycleTheme),
        "show_help" | "help" => Some(Action::ShowHelp),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
