use clap::{Parser, Subcommand};
use colored::*;
use flashdeck_cli::config::Config;
use std::process;

mod cli;

use cli::request::RequestArgs;
use cli::session::SessionCommands;
use cli::validate::ValidateArgs;

#[derive(Parser)]
#[command(name = "flashdeck")]
#[command(about = "Flashdeck CLI - flashcard server client")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Session(SessionCommands),
    /// Send a request to the API with the current session
    Request(RequestArgs),
    /// Check field values against validation rules
    Validate(ValidateArgs),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(e) = handle_command(cli.command).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Session(session_cmd) => session_cmd.execute(&Config::from_env()?).await,
        Commands::Request(args) => args.execute(&Config::from_env()?).await,
        Commands::Validate(args) => args.execute(),
    }
}
