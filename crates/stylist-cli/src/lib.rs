// Library interface for stylist-cli
// This allows integration tests to access internal modules

// NOTE: app.rs and commands.rs are also declared in main.rs, so the path
// attributes point both crates at the same source files.

#[path = "app.rs"]
pub mod app;

#[path = "commands.rs"]
pub mod commands;

pub use commands::{format_message, handle_command, resolve_service, CommandResult};
