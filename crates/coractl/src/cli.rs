//! CLI - Command-line argument parsing
//!
//! Defines the CLI structure using clap. Keeps argument parsing separate
//! from execution logic.

use clap::{Parser, Subcommand};
use uuid::Uuid;

/// Cora support service CLI
#[derive(Parser)]
#[command(name = "coractl")]
#[command(about = "Cora - Telecom customer support session service", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Daemon base URL (overrides $CORAD_URL and the default)
    #[arg(long, global = true)]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show daemon health
    Status {
        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// Manage support sessions
    Session {
        #[command(subcommand)]
        action: SessionCommands,
    },

    /// Run the identity verification steps
    Verify {
        #[command(subcommand)]
        action: VerifyCommands,
    },

    /// Show the account snapshot (authenticated sessions only)
    Account {
        /// Session id from `session start`
        session: Uuid,

        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// List the mobile plan catalog
    Plans,

    /// List retail store locations
    Stores {
        /// Filter by postal-district prefix
        #[arg(long)]
        near: Option<String>,
    },

    /// Search the FAQ corpus
    Faq {
        /// Search terms
        #[arg(required = true)]
        query: Vec<String>,

        /// Maximum hits to show
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
}

/// Session subcommands
#[derive(Subcommand)]
pub enum SessionCommands {
    /// Start a new support session
    Start,

    /// Show a session's auth state
    Show { session: Uuid },

    /// End a session
    End { session: Uuid },
}

/// Verification subcommands
#[derive(Subcommand)]
pub enum VerifyCommands {
    /// Step 1: verify the caller's phone number
    Phone {
        session: Uuid,

        /// Mobile number (e.g. "+65 9123 4567" or "91234567")
        mobile: String,
    },

    /// Step 2: verify the last 4 characters of the NRIC
    Nric {
        session: Uuid,

        /// Last 4 characters (e.g. "567D")
        last4: String,
    },
}
