//! CLI argument parsing

mod accept;
mod common;
mod session;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::defaults;

pub use accept::AcceptArgs;
pub use common::OutputFormat;
pub use session::{SessionAction, SessionShowArgs};

/// Accept invitations and activate sessions
#[derive(Parser, Debug)]
#[command(name = "invitectl")]
#[command(version)]
#[command(about = "Accept organization invitations and activate your session", long_about = None)]
pub struct Cli {
    /// API base URL (overrides INVITECTL_API_URL and the session file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Web app URL used when printing where to continue
    #[arg(long, global = true, env = "INVITECTL_APP_URL")]
    pub app_url: Option<String>,

    /// Pending session token (overrides env vars and the session file)
    #[arg(short = 't', long, global = true)]
    pub token: Option<String>,

    /// Session file path (default: ~/.invitectl/session.json)
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    /// Batch mode: no spinner
    #[arg(short, long, global = true, default_value_t = false)]
    pub batch: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Accept an invitation and activate the resulting session
    Accept(AcceptArgs),

    /// Inspect or clear the stored session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_defaults() {
        let cli = Cli::parse_from(["invitectl", "accept", "inv-123"]);
        assert_eq!(cli.log_level, defaults::LOG_LEVEL);
        assert!(!cli.batch);
        assert!(cli.token.is_none());
        assert!(cli.api_url.is_none());
        match cli.command {
            Command::Accept(args) => {
                assert_eq!(args.invitation, "inv-123");
                assert!(!args.refetch_orgs);
                assert_eq!(args.output, OutputFormat::Table);
            }
            _ => panic!("Expected accept command"),
        }
    }

    #[test]
    fn test_accept_all_options() {
        let cli = Cli::parse_from([
            "invitectl",
            "--api-url",
            "https://api.example.com",
            "-t",
            "pending-abc",
            "accept",
            "inv-123",
            "--refetch-orgs",
            "-o",
            "json",
            "--batch",
            "-l",
            "debug",
        ]);

        assert_eq!(cli.api_url, Some("https://api.example.com".to_string()));
        assert_eq!(cli.token, Some("pending-abc".to_string()));
        assert_eq!(cli.log_level, "debug");
        assert!(cli.batch);
        match cli.command {
            Command::Accept(args) => {
                assert!(args.refetch_orgs);
                assert_eq!(args.output, OutputFormat::Json);
            }
            _ => panic!("Expected accept command"),
        }
    }

    #[test]
    fn test_session_show() {
        let cli = Cli::parse_from(["invitectl", "session", "show", "-o", "json"]);
        match cli.command {
            Command::Session {
                action: SessionAction::Show(args),
            } => assert_eq!(args.output, OutputFormat::Json),
            _ => panic!("Expected session show"),
        }
    }

    #[test]
    fn test_session_clear_with_custom_file() {
        let cli = Cli::parse_from([
            "invitectl",
            "session",
            "clear",
            "--session-file",
            "/tmp/s.json",
        ]);
        assert_eq!(cli.session_file, Some(PathBuf::from("/tmp/s.json")));
        assert!(matches!(
            cli.command,
            Command::Session {
                action: SessionAction::Clear
            }
        ));
    }

    #[test]
    fn test_accept_requires_invitation() {
        assert!(Cli::try_parse_from(["invitectl", "accept"]).is_err());
    }
}
