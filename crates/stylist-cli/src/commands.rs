use chrono::{Local, TimeZone};
use stylist_core::{services, Author, Message, ServiceId};

/// Result of processing a slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Display a message to the user.
    Message(String),
    /// Attach an image to the next message.
    AttachImage(String),
    /// Remove the attached image.
    DropImage,
    /// Print the stored conversation.
    ShowHistory,
    /// Print the styling service catalog.
    ShowServices,
    /// Quit the application.
    Quit,
    /// Not a command - treat as regular input.
    NotACommand,
}

pub fn handle_command(input: &str) -> CommandResult {
    let input = input.trim();
    if !input.starts_with('/') {
        return CommandResult::NotACommand;
    }

    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts[0];
    let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd {
        "/help" | "/h" => show_help(),
        "/exit" | "/quit" | "/q" => CommandResult::Quit,
        "/image" | "/img" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: /image <path-or-file-uri>".into())
            } else {
                CommandResult::AttachImage(arg.to_string())
            }
        }
        "/drop-image" => CommandResult::DropImage,
        "/history" => CommandResult::ShowHistory,
        "/services" => CommandResult::ShowServices,
        _ => CommandResult::Message(format!(
            "Unknown command: {cmd}. Type /help for available commands."
        )),
    }
}

fn show_help() -> CommandResult {
    CommandResult::Message(
        "Stylist Commands:\n\
         \x20 /image <path>   Attach a photo of a clothing item\n\
         \x20 /drop-image     Remove the attached photo\n\
         \x20 /history        Show the conversation, newest first\n\
         \x20 /services       List styling services\n\
         \x20 /help           Show this help\n\
         \x20 /quit           Exit\n\
         Anything else is sent to the clothing care assistant."
            .into(),
    )
}

/// One line per message, e.g. `[14:02] you: how do I wash this? (image: shirt.jpg)`.
pub fn format_message(message: &Message) -> String {
    let who = match message.author() {
        Author::User => "you",
        Author::Assistant => "assistant",
    };
    let when = Local
        .timestamp_millis_opt(message.id())
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut line = format!("[{when}] {who}: {}", message.text());
    if let Some(image) = message.image() {
        line.push_str(&format!(" (image: {image})"));
    }
    line
}

/// The service catalog as printable lines.
pub fn format_services() -> String {
    services::catalog()
        .iter()
        .map(|s| {
            let status = if s.available { "available" } else { "coming soon" };
            format!("{} [{}]\n  {}", s.name, status, s.description)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Resolve a hub service by name, the way the hub only opens services that
/// are available.
pub fn resolve_service(name: &str) -> Result<ServiceId, String> {
    let id = ServiceId::from_name(name)
        .ok_or_else(|| format!("Unknown service: {name}. Use --services to list them."))?;
    let service = id.service();
    if service.available {
        Ok(id)
    } else {
        Err(format!("{} is coming soon.", service.name))
    }
}
