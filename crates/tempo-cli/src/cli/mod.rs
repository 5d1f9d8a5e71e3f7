//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(name = "tempo")]
#[command(version)]
#[command(about = "Tempo to-do client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Register a new account (logs in on success)
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log out and clear the stored credential
    Logout,
    /// Show all to-do lists
    Lists,
    /// Show one list with its items
    Show {
        /// List id
        id: i64,
    },
    /// Create a new to-do list
    Create {
        /// Title of the new list
        title: String,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Write a default config file
    Init,
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(dispatch(cli))
}

/// Logging goes to stderr, controlled by `TEMPO_LOG` (off by default).
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("TEMPO_LOG").unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Register {
            username,
            email,
            password,
        } => commands::auth::register(&username, &email, &password).await,
        Commands::Login { email, password } => commands::auth::login(&email, &password).await,
        Commands::Logout => commands::auth::logout(),
        Commands::Lists => commands::lists::lists().await,
        Commands::Show { id } => commands::lists::show(id).await,
        Commands::Create { title } => commands::lists::create(&title).await,
        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
