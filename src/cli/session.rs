//! Session management CLI arguments

use clap::{Parser, Subcommand};

use super::common::OutputFormat;

/// Session subcommands
#[derive(Subcommand, Debug)]
pub enum SessionAction {
    /// Show the stored session (token is redacted)
    Show(SessionShowArgs),

    /// Remove the stored session file
    Clear,
}

/// Arguments for 'session show' subcommand
#[derive(Parser, Debug)]
pub struct SessionShowArgs {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}
