use anyhow::Result;
use clap::Parser;

mod app;
mod commands;

#[derive(Parser)]
#[command(name = "stylist")]
#[command(about = "Stylist - clothing care assistant")]
#[command(version)]
struct Cli {
    /// Send a single message and exit
    #[arg(short, long)]
    prompt: Option<String>,

    /// Attach an image (path or file:// URI) to the single message
    #[arg(short, long)]
    image: Option<String>,

    /// LLM model to use
    #[arg(short, long)]
    model: Option<String>,

    /// Storage key of the conversation to use
    #[arg(long)]
    conversation: Option<String>,

    /// Print the stored conversation, newest first, and exit
    #[arg(long)]
    history: bool,

    /// List styling services and exit
    #[arg(long)]
    services: bool,

    /// Styling service to open (only the clothing care assistant is available)
    #[arg(long)]
    service: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut settings = stylist_core::Settings::load();

    if let Some(model) = cli.model {
        settings.assistant.model = model;
    }
    if let Some(key) = cli.conversation {
        settings.storage.conversation_key = key;
    }

    if let Some(ref name) = cli.service {
        if let Err(message) = commands::resolve_service(name) {
            println!("{message}");
            return Ok(());
        }
    }

    if cli.services {
        app::show_services();
    } else if cli.history {
        app::show_history(&settings).await?;
    } else if cli.prompt.is_some() || cli.image.is_some() {
        app::run_single_prompt(&settings, cli.prompt, cli.image).await?;
    } else {
        app::run_interactive(&settings).await?;
    }

    Ok(())
}
