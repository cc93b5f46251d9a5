//! Terminal client for the Hacker News story search API.
//!
//! The story-list core (`search`, `stories`, `preferences`) has no
//! dependency on the terminal UI; `app` and `ui` drive it from a ratatui
//! event loop and the binary can also drive it in print mode.

pub mod app;
pub mod config;
pub mod keybindings;
pub mod preferences;
pub mod print;
pub mod search;
pub mod storage;
pub mod stories;
pub mod theme;
pub mod ui;
pub mod util;
