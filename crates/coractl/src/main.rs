//! Cora Control - CLI client for the Cora support daemon
//!
//! Provides the operator interface to sessions, verification, and lookups.

use anyhow::Result;
use clap::Parser;
use console::style;
use cora_common::CoraError;
use coractl::cli::{Cli, Commands, SessionCommands, VerifyCommands};
use coractl::client::{resolve_base_url, CoraClient};
use coractl::commands;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let client = CoraClient::new(resolve_base_url(cli.url.clone()));

    if let Err(e) = run(&cli, &client).await {
        if e.downcast_ref::<CoraError>()
            .is_some_and(|c| matches!(c, CoraError::DaemonNotRunning))
        {
            eprintln!("{} {}", style("error:").red().bold(), CoraError::DaemonNotRunning);
        } else {
            eprintln!("{} {}", style("error:").red().bold(), e);
        }
        std::process::exit(1);
    }
}

async fn run(cli: &Cli, client: &CoraClient) -> Result<()> {
    match &cli.command {
        Commands::Status { json } => commands::status(client, *json).await,

        Commands::Session { action } => match action {
            SessionCommands::Start => commands::session_start(client).await,
            SessionCommands::Show { session } => commands::session_show(client, *session).await,
            SessionCommands::End { session } => commands::session_end(client, *session).await,
        },

        Commands::Verify { action } => match action {
            VerifyCommands::Phone { session, mobile } => {
                commands::verify_phone(client, *session, mobile).await
            }
            VerifyCommands::Nric { session, last4 } => {
                commands::verify_nric(client, *session, last4).await
            }
        },

        Commands::Account { session, json } => commands::account(client, *session, *json).await,

        Commands::Plans => commands::plans(client).await,

        Commands::Stores { near } => commands::stores(client, near.as_deref()).await,

        Commands::Faq { query, limit } => {
            let query = query.join(" ");
            commands::faq(client, &query, *limit).await
        }
    }
}
