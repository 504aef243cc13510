use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialog::{OutboundMessage, PresentationCard};
use server::{BotConfig, BotOrchestrator, run_server};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

/// Conversation id used by the console chat
const CONSOLE_CONVERSATION: &str = "console";

/// ReelBot - conversational movie recommendations
#[derive(Parser)]
#[command(name = "reel-bot")]
#[command(about = "Chatbot that recommends movies by genre, year and popularity", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the webhook server
    Serve {
        /// Address to listen on (overrides BIND_ADDR)
        #[arg(long)]
        bind: Option<SocketAddr>,
    },

    /// Talk to the bot from the terminal
    Chat,

    /// Show which genre a piece of text resolves to
    Genre {
        /// Text the way a user would say it, e.g. "funny"
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind } => handle_serve(bind).await?,
        Commands::Chat => handle_chat().await?,
        Commands::Genre { text } => handle_genre(&text),
    }

    Ok(())
}

fn load_bot() -> Result<(BotConfig, BotOrchestrator)> {
    let config = BotConfig::from_env().context("Failed to load bot configuration")?;
    let bot = BotOrchestrator::from_config(&config)?;
    Ok((config, bot))
}

/// Handle the 'serve' command
async fn handle_serve(bind: Option<SocketAddr>) -> Result<()> {
    let (config, bot) = load_bot()?;
    let addr = bind.unwrap_or(config.bind_addr);
    run_server(Arc::new(bot), addr).await
}

/// Handle the 'chat' command
async fn handle_chat() -> Result<()> {
    let (_, bot) = load_bot()?;

    println!("{}", "MovieBot console. Say hi, ask for a movie, or Ctrl+D to leave.".bold().blue());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", ">".green().bold());
        std::io::Write::flush(&mut std::io::stdout())?;

        let Some(line) = lines.next_line().await? else {
            info!("Console input closed");
            break;
        };
        for message in bot.handle_message(CONSOLE_CONVERSATION, &line).await {
            print_message(&message);
        }
    }

    println!();
    Ok(())
}

/// Handle the 'genre' command
fn handle_genre(text: &str) {
    match catalog::best_match(text) {
        Some(found) => match found.choice.genre() {
            Some(genre) => println!(
                "{} {} (id {}, score {:.2})",
                "✓".green(),
                genre.name().bold(),
                genre.id(),
                found.score
            ),
            None => println!(
                "{} matched {} (score {:.2}), no genre filter",
                "•".yellow(),
                found.choice.name(),
                found.score
            ),
        },
        None => println!("{} No genre matches '{}'", "✗".red(), text),
    }
}

fn print_message(message: &OutboundMessage) {
    match message {
        OutboundMessage::Text(text) => println!("{} {}", "bot:".cyan().bold(), text),
        OutboundMessage::Typing => println!("{}", "bot is typing...".dimmed()),
        OutboundMessage::Carousel(cards) if cards.is_empty() => {
            println!("{}", "(no movies to show)".dimmed())
        }
        OutboundMessage::Carousel(cards) => {
            for (i, card) in cards.iter().enumerate() {
                print_card(i + 1, card);
            }
        }
    }
}

fn print_card(rank: usize, card: &PresentationCard) {
    println!("{}. {}", rank.to_string().green(), card.title.bold());
    if !card.text.is_empty() {
        println!("   {}", card.text);
    }
    if let Some(image) = card.images.first() {
        println!("   Poster: {}", image.url);
    }
    if let Some(link) = card.link() {
        println!("   Info:   {}", link.underline());
    }
}
