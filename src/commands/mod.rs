//! Command handlers

mod accept;
mod session;

pub use accept::run_accept_command;
pub use session::run_session_command;

use crate::cli::Cli;
use crate::session::FileSessionStore;

/// Session store at --session-file, or the default location
fn session_store(cli: &Cli) -> FileSessionStore {
    match &cli.session_file {
        Some(path) => FileSessionStore::with_path(path.clone()),
        None => FileSessionStore::new(),
    }
}
