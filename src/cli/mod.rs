mod commands;
mod handlers;

pub use commands::{Cli, Commands, DEFAULT_ADMIN_KEY, DEFAULT_BIND, DEFAULT_STORIES_FILE};
pub use handlers::{format_story_line, handle_capsule, handle_list, handle_read, handle_serve};
