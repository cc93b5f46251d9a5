//! Terminal User Interface module.
//!
//! This module provides the TUI for the story search, including:
//! - Main event loop (`run`)
//! - Input handling for browse and search modes
//! - Rendering for the search box, recent searches and story table
//! - Background fetch result processing
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Background task event processing
//! - `render` - Screen layout and fetch footer
//! - `helpers` - Fetch spawning and browser opening
//! - `search` - Search input and recent-searches line
//! - `stories` - Story table widget
//! - `status` - Status bar widget
//! - `help` - Keybinding help overlay

mod events;
mod help;
mod helpers;
mod input;
mod loop_runner;
mod render;
mod search;
mod status;
mod stories;

// Re-export the public API
pub use loop_runner::{run, Action};
