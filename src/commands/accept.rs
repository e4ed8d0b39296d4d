//! Accept command handler

use log::{debug, info};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use crate::api::ApiClient;
use crate::cache::RefetchingQueryCache;
use crate::cli::{AcceptArgs, Cli};
use crate::config::flow as flow_config;
use crate::error::Result;
use crate::flow::{AcceptOutcome, InviteAcceptanceFlow};
use crate::output::{output_accept_summary, AcceptSummary};
use crate::session::{
    ApiUrlResolver, Credential, FileSessionStore, InvitationToken, SessionStore, TokenResolver,
};
use crate::sinks::{LogTelemetry, TerminalNavigator, TerminalNotifier};
use crate::ui::{clear_spinner, create_spinner, set_spinner_message};

use super::session_store;

/// File-backed store that also makes the stored credential the client's
/// authorization, so later requests run under the new session
struct ActivatingSessionStore {
    inner: FileSessionStore,
    client: Arc<ApiClient>,
}

impl SessionStore for ActivatingSessionStore {
    fn active_credential(&self) -> Result<Option<Credential>> {
        self.inner.active_credential()
    }

    fn set_active_credential(
        &self,
        credential: Credential,
        refetch: bool,
    ) -> Result<Option<Credential>> {
        let previous = self.inner.set_active_credential(credential.clone(), refetch)?;
        self.client.set_authorization(&credential);
        Ok(previous)
    }

    fn restore_credential(&self, previous: Option<Credential>) -> Result<()> {
        if let Some(credential) = &previous {
            self.client.set_authorization(credential);
        }
        self.inner.restore_credential(previous)
    }
}

/// Run the accept command
pub async fn run_accept_command(
    cli: &Cli,
    args: &AcceptArgs,
) -> std::result::Result<ExitCode, Box<dyn std::error::Error>> {
    let invitation = InvitationToken::new(args.invitation.trim());
    if invitation.as_str().is_empty() {
        return Err("Invitation token must not be empty".into());
    }

    let file_store = session_store(cli);
    let session = file_store.load()?;
    let api_url = ApiUrlResolver::resolve(cli.api_url.as_deref(), &session)?;
    let pending = TokenResolver::new(&session).resolve(cli.token.as_deref())?;

    debug!(
        "Accepting invitation '{}' at {} with pending session {}",
        invitation,
        api_url,
        pending.redacted()
    );

    let client = Arc::new(ApiClient::new(api_url.clone()));
    let store = Arc::new(ActivatingSessionStore {
        inner: file_store,
        client: client.clone(),
    });
    let cache = Arc::new(RefetchingQueryCache::new(client.clone()));
    let flow = InviteAcceptanceFlow::new(
        client,
        store.clone(),
        cache.clone(),
        Arc::new(TerminalNotifier),
        Arc::new(LogTelemetry),
        Arc::new(TerminalNavigator::new(cli.app_url.as_deref())),
    );

    let spinner = create_spinner("Accepting invitation...", cli.batch);
    let submit = flow.submit_token(&pending, &invitation, args.refetch_orgs);
    tokio::pin!(submit);

    let mut ticker = tokio::time::interval(Duration::from_millis(100));
    let mut seen_loading = false;
    let outcome = loop {
        tokio::select! {
            outcome = &mut submit => break outcome,
            _ = ticker.tick() => {
                let loading = flow.state().is_loading;
                if loading {
                    seen_loading = true;
                } else if seen_loading {
                    set_spinner_message(spinner.as_ref(), "Activating session...");
                }
            }
        }
    };
    clear_spinner(spinner);

    match outcome {
        AcceptOutcome::Accepted(credential) => {
            store.inner.set_api_url(&api_url)?;
            let summary = AcceptSummary::new(
                invitation.as_str(),
                &credential,
                flow_config::LANDING_ROUTE,
                cache.organizations(),
            );
            output_accept_summary(&summary, args.output);
            Ok(ExitCode::SUCCESS)
        }
        AcceptOutcome::NoCredential => {
            info!("Invitation accepted without a new session; nothing changed");
            Ok(ExitCode::SUCCESS)
        }
        AcceptOutcome::Suppressed => Err("Another invite acceptance is already running".into()),
        AcceptOutcome::Failed(failure) => {
            debug!("Accept failed: {}", failure);
            Ok(ExitCode::FAILURE)
        }
    }
}
