//! Collaborator seams of the acceptance flow

use async_trait::async_trait;
use std::fmt;

use crate::error::{AcceptInviteFailure, Result};
use crate::session::{ActivatedCredential, Credential, InvitationToken};

/// Backend that accepts invitations
#[async_trait]
pub trait InviteBackend: Send + Sync {
    /// Credential applied to requests issued after this call
    fn set_authorization(&self, credential: &Credential);

    /// Single accept attempt; `Ok(None)` when no credential came back
    async fn accept_invite(
        &self,
        invitation: &InvitationToken,
    ) -> Result<Option<ActivatedCredential>>;
}

/// Notification severity
///
/// The flow only notifies on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
        }
    }
}

/// User-facing notifications (fire-and-forget)
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Exception reporting (fire-and-forget)
pub trait Telemetry: Send + Sync {
    fn report_exception(&self, failure: &AcceptInviteFailure);
}

/// Moves the user to a route (fire-and-forget)
pub trait Navigator: Send + Sync {
    fn go_to(&self, route: &str);
}
