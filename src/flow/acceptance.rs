//! Invite acceptance: token exchange and session activation

use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::cache::{is_organization_query, QueryCache};
use crate::config::flow as flow_config;
use crate::error::{AcceptInviteFailure, DownstreamStage, InviteError};
use crate::session::{ActivatedCredential, InvitationToken, PendingCredential, SessionStore};

use super::traits::{InviteBackend, Navigator, Notifier, Severity, Telemetry};

/// Result of one `submit_token` call
#[derive(Debug)]
pub enum AcceptOutcome {
    /// Session activated and the user was sent to the landing route
    Accepted(ActivatedCredential),
    /// Backend accepted but returned no credential; nothing changed
    NoCredential,
    /// Another acceptance was still running on this flow
    Suppressed,
    /// Reported to telemetry and the user; the session was left as it was
    Failed(AcceptInviteFailure),
}

impl AcceptOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, AcceptOutcome::Accepted(_))
    }

    pub fn failure(&self) -> Option<&AcceptInviteFailure> {
        match self {
            AcceptOutcome::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Snapshot of the last network-step error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    /// HTTP status, when the backend answered
    pub status: Option<u16>,
    pub message: String,
}

impl From<&InviteError> for RequestError {
    fn from(err: &InviteError) -> Self {
        let status = match err {
            InviteError::Api { status, .. } => Some(*status),
            InviteError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Observable state of the flow
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowState {
    /// True only while the accept request is outstanding
    pub is_loading: bool,
    /// Error from the most recent accept request
    pub error: Option<RequestError>,
}

impl FlowState {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Clears an atomic flag when dropped
struct FlagGuard<'a>(&'a AtomicBool);

impl<'a> FlagGuard<'a> {
    /// Set the flag, or `None` if it was already set
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Exchanges an invitation token for an activated session
///
/// Steps run strictly in order, each only after the previous succeeded:
/// apply the pending credential, accept the invite, store the activated
/// credential, refetch organization queries (optional, awaited), navigate.
pub struct InviteAcceptanceFlow {
    backend: Arc<dyn InviteBackend>,
    session: Arc<dyn SessionStore>,
    cache: Arc<dyn QueryCache>,
    notifier: Arc<dyn Notifier>,
    telemetry: Arc<dyn Telemetry>,
    navigator: Arc<dyn Navigator>,
    /// Held for a whole invocation (single-flight)
    busy: AtomicBool,
    /// Held only around the network request
    loading: AtomicBool,
    last_error: Mutex<Option<RequestError>>,
}

impl InviteAcceptanceFlow {
    pub fn new(
        backend: Arc<dyn InviteBackend>,
        session: Arc<dyn SessionStore>,
        cache: Arc<dyn QueryCache>,
        notifier: Arc<dyn Notifier>,
        telemetry: Arc<dyn Telemetry>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            backend,
            session,
            cache,
            notifier,
            telemetry,
            navigator,
            busy: AtomicBool::new(false),
            loading: AtomicBool::new(false),
            last_error: Mutex::new(None),
        }
    }

    pub fn state(&self) -> FlowState {
        FlowState {
            is_loading: self.loading.load(Ordering::Acquire),
            error: self
                .last_error
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .clone(),
        }
    }

    /// Accept `invitation` using `pending` as the request credential
    ///
    /// Never returns an error: failures are reported to telemetry and the
    /// user, then returned as `AcceptOutcome::Failed`.
    pub async fn submit_token(
        &self,
        pending: &PendingCredential,
        invitation: &InvitationToken,
        refetch_organizations: bool,
    ) -> AcceptOutcome {
        let Some(_busy) = FlagGuard::acquire(&self.busy) else {
            warn!(
                "Invite acceptance already in progress, ignoring invitation '{}'",
                invitation
            );
            return AcceptOutcome::Suppressed;
        };

        match self.run(pending, invitation, refetch_organizations).await {
            Ok(Some(activated)) => {
                info!("Accepted invitation '{}'", invitation);
                AcceptOutcome::Accepted(activated)
            }
            Ok(None) => {
                debug!(
                    "Invitation '{}' accepted without a new credential",
                    invitation
                );
                AcceptOutcome::NoCredential
            }
            Err(failure) => {
                self.telemetry.report_exception(&failure);
                self.notifier
                    .notify(flow_config::FAILURE_MESSAGE, Severity::Error);
                AcceptOutcome::Failed(failure)
            }
        }
    }

    async fn run(
        &self,
        pending: &PendingCredential,
        invitation: &InvitationToken,
        refetch_organizations: bool,
    ) -> Result<Option<ActivatedCredential>, AcceptInviteFailure> {
        self.backend.set_authorization(pending);

        let Some(activated) = self.accept(invitation).await? else {
            return Ok(None);
        };

        let previous = self
            .session
            .set_active_credential(activated.clone(), refetch_organizations)
            .map_err(|source| AcceptInviteFailure::DownstreamFailure {
                stage: DownstreamStage::SessionStore,
                source,
            })?;

        if refetch_organizations {
            if let Err(source) = self.cache.invalidate_matching(&is_organization_query).await {
                // Roll back so a reported failure leaves the old session in place
                if let Err(e) = self.session.restore_credential(previous) {
                    warn!("Failed to restore previous credential: {}", e);
                }
                return Err(AcceptInviteFailure::DownstreamFailure {
                    stage: DownstreamStage::CacheInvalidation,
                    source,
                });
            }
        }

        self.navigator.go_to(flow_config::LANDING_ROUTE);
        Ok(Some(activated))
    }

    /// The network step; the only part that drives `is_loading`
    async fn accept(
        &self,
        invitation: &InvitationToken,
    ) -> Result<Option<ActivatedCredential>, AcceptInviteFailure> {
        self.set_last_error(None);

        let result = {
            let _loading = FlagGuard::acquire(&self.loading);
            self.backend.accept_invite(invitation).await
        };

        result.map_err(|err| {
            self.set_last_error(Some(RequestError::from(&err)));
            AcceptInviteFailure::from_network(err)
        })
    }

    fn set_last_error(&self, error: Option<RequestError>) {
        *self.last_error.lock().unwrap_or_else(|e| e.into_inner()) = error;
    }
}
