use std::sync::Arc;

use anyhow::Result;
use stylist_core::{ConversationSession, ImageRef, OpenAIClient, SendOutcome, Settings};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::commands::{format_message, format_services, handle_command, CommandResult};

async fn open_session(settings: &Settings) -> Result<ConversationSession> {
    let client = settings.build_client()?;
    open_with_client(settings, client).await
}

async fn open_with_client(
    settings: &Settings,
    client: OpenAIClient,
) -> Result<ConversationSession> {
    let store = settings.open_store()?;
    Ok(ConversationSession::open(
        store,
        settings.storage.conversation_key.clone(),
        settings.request_builder(),
        Arc::new(client),
    )
    .await)
}

fn print_outcome(outcome: &SendOutcome) {
    match outcome {
        SendOutcome::Replied { reply, .. } => println!("{}", reply.text()),
        SendOutcome::Skipped => println!("Nothing to send: type a message or attach an image."),
    }
}

/// Send one turn, print the reply and wait for it to be saved.
pub async fn run_single_prompt(
    settings: &Settings,
    prompt: Option<String>,
    image: Option<String>,
) -> Result<()> {
    let mut session = open_session(settings).await?;

    session.set_text(prompt.unwrap_or_default());
    if let Some(image) = image {
        session.attach_image(ImageRef::new(image));
    }

    let outcome = session.send().await?;
    print_outcome(&outcome);
    session.flush().await;
    Ok(())
}

pub async fn show_history(settings: &Settings) -> Result<()> {
    let store = settings.open_store()?;
    let messages =
        stylist_core::MessageStore::load(store, settings.storage.conversation_key.clone()).await;

    if messages.is_empty() {
        println!("No messages yet.");
    }
    for message in messages.newest_first() {
        println!("{}", format_message(message));
    }
    Ok(())
}

pub fn show_services() {
    println!("{}", format_services());
}

/// Interactive loop over stdin until `/quit` or end of input.
pub async fn run_interactive(settings: &Settings) -> Result<()> {
    run_lines(settings, BufReader::new(tokio::io::stdin())).await
}

/// Drive the assistant from `input`, one line per command or message.
/// Without an API key only sending is unavailable; `/history` and
/// `/services` keep working.
pub async fn run_lines<R: AsyncBufRead + Unpin>(settings: &Settings, input: R) -> Result<()> {
    let no_key = format!(
        "No API key configured: set {} to talk to the assistant.",
        settings.assistant.api_key_env
    );

    let mut session = match settings.build_client() {
        Ok(client) => Some(open_with_client(settings, client).await?),
        Err(e) => {
            tracing::warn!("Starting without a completion client: {e}");
            println!("{no_key}");
            None
        }
    };
    let mut lines = input.lines();

    println!("Clothing Care Assistant. Type /help for commands.");

    while let Some(line) = lines.next_line().await? {
        match handle_command(&line) {
            CommandResult::Quit => break,
            CommandResult::Message(text) => println!("{text}"),
            CommandResult::AttachImage(reference) => match session.as_mut() {
                Some(session) => {
                    println!("Attached {reference}");
                    session.attach_image(ImageRef::new(reference));
                }
                None => println!("{no_key}"),
            },
            CommandResult::DropImage => {
                if let Some(session) = session.as_mut() {
                    session.clear_image();
                }
                println!("Image removed.");
            }
            CommandResult::ShowHistory => match session.as_ref() {
                Some(session) => {
                    for message in session.newest_first() {
                        println!("{}", format_message(message));
                    }
                }
                None => show_history(settings).await?,
            },
            CommandResult::ShowServices => show_services(),
            CommandResult::NotACommand => match session.as_mut() {
                Some(session) => {
                    session.set_text(line);
                    match session.send().await {
                        Ok(outcome) => print_outcome(&outcome),
                        Err(e) => {
                            tracing::warn!("Send failed: {e}");
                            println!("Could not send: {e}");
                        }
                    }
                }
                None => println!("{no_key}"),
            },
        }
    }

    if let Some(session) = session.as_ref() {
        session.flush().await;
    }
    Ok(())
}
