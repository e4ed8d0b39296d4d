//! Session command handlers

use std::process::ExitCode;

use crate::cli::{Cli, SessionAction};
use crate::output::{output_session, SessionView};

use super::session_store;

/// Run a session subcommand
pub fn run_session_command(
    cli: &Cli,
    action: &SessionAction,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let store = session_store(cli);

    match action {
        SessionAction::Show(args) => {
            let session = store.load()?;
            output_session(&SessionView::new(store.path(), &session), args.output);
        }
        SessionAction::Clear => {
            if store.clear()? {
                println!("Removed session file {}", store.path().display());
            } else {
                println!("No session file at {}", store.path().display());
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
