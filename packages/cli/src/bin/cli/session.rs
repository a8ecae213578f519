// ABOUTME: CLI commands for the Flashdeck session
// ABOUTME: Login with form validation, logout and local session status

use anyhow::{bail, Result};
use clap::Subcommand;
use colored::*;
use flashdeck_cli::config::Config;
use flashdeck_cli::forms::{login_form, login_values};
use flashdeck_cli::{build_client, open_state};
use flashdeck_client::ApiResponse;
use flashdeck_validation::validate_form;
use inquire::{Password, Text};

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Log in to the Flashdeck server
    Login {
        /// Username; prompted for when omitted
        #[arg(long, short)]
        username: Option<String>,

        /// Password; prompted for when omitted
        #[arg(long, short)]
        password: Option<String>,
    },

    /// End the current session
    Logout,

    /// Show the stored session
    Status,
}

impl SessionCommands {
    pub async fn execute(self, config: &Config) -> Result<()> {
        match self {
            SessionCommands::Login { username, password } => {
                login_command(config, username, password).await
            }
            SessionCommands::Logout => logout_command(config).await,
            SessionCommands::Status => status_command(config),
        }
    }
}

async fn login_command(
    config: &Config,
    username: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let username = match username {
        Some(username) => username,
        None => Text::new("Username:").prompt()?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::new("Password:").without_confirmation().prompt()?,
    };

    let result = validate_form(&login_values(&username, &password), &login_form());
    if !result.is_valid() {
        for (field, messages) in result.messages() {
            eprintln!("{} {}: {}", "✗".red().bold(), field, messages.join(", "));
        }
        bail!("Login form is invalid");
    }

    let client = build_client(config)?;
    match client.login(&username, &password).await? {
        ApiResponse::Success(_) => {
            println!(
                "{} Logged in as {}",
                "✓".green().bold(),
                username.bold()
            );
            if client.state().is_admin() {
                println!("  {} administrator", "★".yellow());
            }
            Ok(())
        }
        ApiResponse::Failure(_) => bail!("Login failed"),
        ApiResponse::SessionExpired => bail!("Login rejected as an expired session"),
    }
}

async fn logout_command(config: &Config) -> Result<()> {
    let client = build_client(config)?;
    if client.session().current().is_none() {
        println!("{} Not logged in", "ℹ".cyan());
        return Ok(());
    }

    client.logout().await?;
    println!("{} Logged out", "✓".green().bold());
    Ok(())
}

fn status_command(config: &Config) -> Result<()> {
    let state = open_state(config);

    println!("{}", "Flashdeck session".bold().cyan());
    println!("  Server:   {}", config.api_url);
    println!("  Data dir: {}", config.data_dir.display());

    match state.session().get() {
        None => println!("  Session:  {}", "not logged in".dimmed()),
        Some(session) if session.is_expired() => {
            println!("  Session:  {}", "expired".yellow())
        }
        Some(session) => {
            let username = session.username.unwrap_or_default();
            println!("  Session:  {} {}", "logged in as".green(), username.bold());

            let person_id = state.person_id().get();
            if !person_id.is_empty() {
                println!("  Person:   {}", person_id);
            }

            let permissions = state
                .permissions()
                .get()
                .iter()
                .map(|permission| permission.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            println!("  Roles:    {}", permissions);
        }
    }

    Ok(())
}
