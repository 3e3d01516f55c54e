//! CLI parsing tests
//!
//! The argument surface is part of the UX contract; these tests pin it
//! without touching the network.

use clap::Parser;
use coractl::cli::{Cli, Commands, SessionCommands, VerifyCommands};

const SESSION: &str = "7f8c8dd2-6a5f-4b0e-9c3e-2f1a6d9b4c11";

#[test]
fn test_status_with_json_flag() {
    let cli = Cli::parse_from(["coractl", "status", "--json"]);
    assert!(matches!(cli.command, Commands::Status { json: true }));
}

#[test]
fn test_session_subcommands() {
    let cli = Cli::parse_from(["coractl", "session", "start"]);
    assert!(matches!(
        cli.command,
        Commands::Session {
            action: SessionCommands::Start
        }
    ));

    let cli = Cli::parse_from(["coractl", "session", "show", SESSION]);
    match cli.command {
        Commands::Session {
            action: SessionCommands::Show { session },
        } => assert_eq!(session.to_string(), SESSION),
        _ => panic!("expected session show"),
    }
}

#[test]
fn test_verify_phone_takes_raw_mobile() {
    let cli = Cli::parse_from(["coractl", "verify", "phone", SESSION, "+65 9123 4567"]);
    match cli.command {
        Commands::Verify {
            action: VerifyCommands::Phone { mobile, .. },
        } => assert_eq!(mobile, "+65 9123 4567"),
        _ => panic!("expected verify phone"),
    }
}

#[test]
fn test_faq_joins_terms_and_defaults_limit() {
    let cli = Cli::parse_from(["coractl", "faq", "data", "roaming"]);
    match cli.command {
        Commands::Faq { query, limit } => {
            assert_eq!(query, vec!["data", "roaming"]);
            assert_eq!(limit, 5);
        }
        _ => panic!("expected faq"),
    }
}

#[test]
fn test_faq_requires_a_query() {
    assert!(Cli::try_parse_from(["coractl", "faq"]).is_err());
}

#[test]
fn test_bad_session_id_is_rejected() {
    assert!(Cli::try_parse_from(["coractl", "account", "not-a-uuid"]).is_err());
}

#[test]
fn test_global_url_flag() {
    let cli = Cli::parse_from(["coractl", "--url", "http://127.0.0.1:9999", "plans"]);
    assert_eq!(cli.url.as_deref(), Some("http://127.0.0.1:9999"));
    assert!(matches!(cli.command, Commands::Plans));
}
