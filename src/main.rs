//! invitectl - Main entry point

use clap::Parser;
use log::{debug, info};
use std::process::ExitCode;

use invitectl::{run_accept_command, run_session_command, Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    info!("Starting invitectl v{}", env!("CARGO_PKG_VERSION"));
    debug!(
        "CLI args: api_url={:?}, session_file={:?}, batch={}",
        cli.api_url, cli.session_file, cli.batch
    );

    let result = match &cli.command {
        Command::Accept(args) => run_accept_command(&cli, args).await,
        Command::Session { action } => run_session_command(&cli, action),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
