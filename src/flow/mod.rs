//! Invite acceptance flow
//!
//! The flow talks to its collaborators only through the traits in
//! [`traits`], so the CLI and tests can plug in their own.

mod acceptance;
pub mod traits;

pub use acceptance::{AcceptOutcome, FlowState, InviteAcceptanceFlow, RequestError};
pub use traits::{InviteBackend, Navigator, Notifier, Severity, Telemetry};
