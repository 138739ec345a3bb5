//! parley - terminal chat widget

mod config;
mod line;
mod ui;

use clap::Parser;
use config::Config;
use parley_client::{HttpExchange, RetryingClient};
use parley_core::ConversationController;
use parley_tui::Theme;
use std::path::PathBuf;
use std::sync::Arc;

/// parley - chat with a support bot from the terminal
#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Chat endpoint URL (default: http://localhost:5000/chat)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Send a single message, print the reply and exit
    #[arg(short = 'c', long)]
    command: Option<String>,

    /// Disable TUI mode (use simple stdin/stdout)
    #[arg(long)]
    no_tui: bool,

    /// Start with the chat panel expanded
    #[arg(long)]
    open: bool,

    /// Initialize config file
    #[arg(long)]
    init_config: bool,

    /// Write debug logs to parley.log in the config directory
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging() -> anyhow::Result<PathBuf> {
    use tracing_subscriber::EnvFilter;

    let dir = Config::config_dir();
    std::fs::create_dir_all(&dir)?;
    let path = dir.join("parley.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("parley=debug,parley_core=debug,parley_client=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();

    Ok(path)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(Config::config_path);

    if args.init_config {
        match Config::init(&config_path) {
            Ok(path) => {
                println!("Config file created at: {}", path.display());
                println!("\nExample config:\n{}", config::example_config());
            }
            Err(e) => {
                eprintln!("Error creating config: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    if args.verbose {
        let log_path = init_logging()?;
        eprintln!("Logging to {}", log_path.display());
    }

    let cfg = Config::load_from(&config_path);
    let env_endpoint = std::env::var("PARLEY_ENDPOINT").ok();
    let endpoint = cfg.resolve_endpoint(args.endpoint.as_deref(), env_endpoint.as_deref());
    tracing::info!("Using endpoint {}", endpoint);

    let client = RetryingClient::new(Arc::new(HttpExchange::new()), endpoint)
        .with_policy(cfg.retry.clone())?;

    let theme = match cfg.theme.as_deref() {
        Some(name) => Theme::by_name(name).unwrap_or_else(|| {
            eprintln!("Warning: Unknown theme '{}', using dark", name);
            Theme::dark()
        }),
        None => Theme::default(),
    };

    // One-shot mode
    if let Some(command) = &args.command {
        let controller = ConversationController::new(client, cfg.controller_config(true));
        let answered = line::run_once(&controller, command).await?;
        if !answered {
            std::process::exit(1);
        }
        return Ok(());
    }

    if args.no_tui {
        let controller = ConversationController::new(client, cfg.controller_config(true));
        return line::run_line_mode(&controller).await;
    }

    let controller = ConversationController::new(client, cfg.controller_config(args.open));
    ui::run_tui(controller, theme).await
}
