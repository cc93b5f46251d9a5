//! Small helpers shared by the table renderer and the open-in-browser action.

mod link;
mod text;

pub use link::{story_link, validate_link_for_open, LinkError};
pub use text::{display_width, relative_age, single_line, truncate_to_width};
