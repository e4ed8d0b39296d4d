//! invitectl - accept organization invitations from the terminal
//!
//! Exchanges an invitation token for an activated session credential,
//! refreshes organization data, and points the user at the landing page.
//!
//! # Features
//!
//! - Pending token taken from CLI, environment, or the stored session
//! - Activated credential persisted atomically to `~/.invitectl/session.json`
//! - Optional organization refetch before finishing
//! - Tagged failure kinds behind a single user-facing message
//!
//! # Example
//!
//! ```bash
//! # Accept with the token stored in the session file
//! invitectl accept inv-123
//!
//! # Accept with an explicit pending token and refresh organizations
//! invitectl --token <PENDING> accept inv-123 --refetch-orgs
//!
//! # Show the stored session
//! invitectl session show -o json
//! ```

pub mod api;
pub mod cache;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod flow;
pub mod output;
pub mod session;
pub mod sinks;
pub mod ui;

pub use api::{ApiClient, Organization};
pub use cache::{is_organization_query, MemoryQueryCache, QueryCache, QueryKey};
pub use cli::{AcceptArgs, Cli, Command, OutputFormat, SessionAction};
pub use commands::{run_accept_command, run_session_command};
pub use error::{AcceptInviteFailure, DownstreamStage, InviteError, Result};
pub use flow::{
    AcceptOutcome, FlowState, InviteAcceptanceFlow, InviteBackend, Navigator, Notifier, Severity,
    Telemetry,
};
pub use session::{
    Credential, FileSessionStore, InvitationToken, MemorySessionStore, SessionStore,
};
