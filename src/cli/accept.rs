//! Accept command arguments

use clap::Parser;

use super::common::OutputFormat;

/// Arguments for 'accept' command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
        invitectl accept inv-123\n  \
        invitectl --token <PENDING> accept inv-123 --refetch-orgs\n  \
        invitectl accept inv-123 -o json")]
pub struct AcceptArgs {
    /// Invitation token from the invite link
    pub invitation: String,

    /// Refresh organization data before finishing
    #[arg(long, default_value_t = false)]
    pub refetch_orgs: bool,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}
