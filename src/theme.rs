//! Theme system for the TUI.
//!
//! `ThemeVariant` selects between Dark and Light palettes, and `StyleMap`
//! resolves semantic role names to concrete ratatui styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Display name, also the stored preference value in lowercase.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette
// ============================================================================

/// Every semantic UI role mapped to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Story table --
    pub story_normal: Style,
    pub story_selected: Style,
    pub story_meta: Style,
    pub table_header: Style,
    pub sort_active: Style,

    // -- Search bar --
    pub search_input: Style,
    pub search_input_active: Style,
    pub recent_search: Style,
    pub recent_search_key: Style,
    pub total_comments: Style,

    // -- Fetch status --
    pub loading: Style,
    pub error: Style,
    pub more_button: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
    pub help_key: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            story_normal: Style::default(),
            story_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            story_meta: Style::default().fg(Color::Gray),
            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            sort_active: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),

            search_input: Style::default(),
            search_input_active: Style::default().fg(Color::Yellow),
            recent_search: Style::default().fg(Color::Cyan),
            recent_search_key: Style::default().fg(Color::DarkGray),
            total_comments: Style::default().add_modifier(Modifier::BOLD),

            loading: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
            error: Style::default().fg(Color::Red),
            more_button: Style::default().fg(Color::Green),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
            help_key: Style::default().fg(Color::Yellow),
        }
    }

    fn light() -> Self {
        Self {
            story_normal: Style::default().fg(Color::Black),
            story_selected: Style::default().bg(Color::Blue).fg(Color::White),
            story_meta: Style::default().fg(Color::DarkGray),
            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            sort_active: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),

            search_input: Style::default().fg(Color::Black),
            search_input_active: Style::default().fg(Color::Magenta),
            recent_search: Style::default().fg(Color::Blue),
            recent_search_key: Style::default().fg(Color::DarkGray),
            total_comments: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            loading: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::ITALIC),
            error: Style::default().fg(Color::Red),
            more_button: Style::default().fg(Color::Green),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
            help_key: Style::default().fg(Color::Magenta),
        }
    }
}

// ============================================================================
// Style Map
// ============================================================================

/// String-keyed style lookup so render code can ask for a role by name.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

const ROLE_NAMES: [&str; 17] = [
    "story_normal",
    "story_selected",
    "story_meta",
    "table_header",
    "sort_active",
    "search_input",
    "search_input_active",
    "recent_search",
    "recent_search_key",
    "total_comments",
    "loading",
    "error",
    "more_button",
    "status_bar",
    "panel_border",
    "panel_border_focused",
    "help_key",
];

impl StyleMap {
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 17] = [
            p.story_normal,
            p.story_selected,
            p.story_meta,
            p.table_header,
            p.sort_active,
            p.search_input,
            p.search_input_active,
            p.recent_search,
            p.recent_search_key,
            p.total_comments,
            p.loading,
            p.error,
            p.more_button,
            p.status_bar,
            p.panel_border,
            p.panel_border_focused,
            p.help_key,
        ];

        let map = ROLE_NAMES.iter().copied().zip(styles).collect();
        Self { map }
    }

    /// Resolve a role name; unknown roles get `Style::default()`.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_palette_selection_and_border() {
        let palette = ThemeVariant::Dark.palette();
        assert_eq!(
            palette.story_selected,
            Style::default().bg(Color::DarkGray).fg(Color::White)
        );
        assert_eq!(
            palette.panel_border_focused,
            Style::default().fg(Color::Cyan)
        );
    }

    #[test]
    fn error_is_red_in_both_variants() {
        for variant in [ThemeVariant::Dark, ThemeVariant::Light] {
            assert_eq!(variant.palette().error, Style::default().fg(Color::Red));
        }
    }

    #[test]
    fn light_palette_differs_from_dark() {
        let dark = ThemeVariant::Dark.palette();
        let light = ThemeVariant::Light.palette();
        assert_ne!(dark.story_selected, light.story_selected);
        assert_ne!(dark.status_bar, light.status_bar);
    }

    #[test]
    fn variant_from_str_name() {
        assert_eq!(
            ThemeVariant::from_str_name("dark"),
            Some(ThemeVariant::Dark)
        );
        assert_eq!(
            ThemeVariant::from_str_name("Light"),
            Some(ThemeVariant::Light)
        );
        assert_eq!(ThemeVariant::from_str_name("neon"), None);
    }

    #[test]
    fn variant_name_round_trips() {
        for variant in [ThemeVariant::Dark, ThemeVariant::Light] {
            assert_eq!(ThemeVariant::from_str_name(variant.name()), Some(variant));
        }
        assert_eq!(ThemeVariant::Dark.next().next(), ThemeVariant::Dark);
    }

    #[test]
    fn style_map_resolves_known_roles() {
        let palette = ThemeVariant::Dark.palette();
        let sm = StyleMap::from_palette(&palette);

        assert_eq!(sm.resolve("story_selected"), palette.story_selected);
        assert_eq!(sm.resolve("sort_active"), palette.sort_active);
        assert_eq!(sm.resolve("status_bar"), palette.status_bar);
        assert_eq!(sm.resolve("nonexistent_role"), Style::default());
    }

    #[test]
    fn style_map_has_all_roles() {
        let sm = StyleMap::from_palette(&ThemeVariant::Light.palette());
        assert_eq!(sm.map.len(), ROLE_NAMES.len());
        for name in ROLE_NAMES {
            assert!(sm.map.contains_key(name), "Role '{}' missing", name);
        }
    }
}
