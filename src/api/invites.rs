//! Invite API operations

use async_trait::async_trait;
use log::debug;

use crate::config::api;
use crate::error::{InviteError, Result};
use crate::flow::InviteBackend;
use crate::session::{ActivatedCredential, Credential, InvitationToken};

use super::client::ApiClient;
use super::models::AcceptInviteResponse;

impl ApiClient {
    /// Accept an invitation under the currently applied authorization
    ///
    /// Returns `Ok(None)` when the backend accepts but sends no credential.
    /// A single attempt is made.
    pub async fn accept_invite(
        &self,
        invitation: &InvitationToken,
    ) -> Result<Option<ActivatedCredential>> {
        let url = self.url(&format!(
            "{}/{}/accept",
            api::INVITES,
            invitation.path_segment()
        ));

        debug!("Accepting invitation at {}", url);

        let response = self
            .post(&url)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let body = response.text().await?;
        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            debug!("Accept response carried no body");
            return Ok(None);
        }

        let parsed: AcceptInviteResponse = serde_json::from_str(trimmed).map_err(|e| {
            InviteError::Json(format!("Failed to parse accept-invite response: {}", e))
        })?;

        Ok(parsed.into_token().map(Credential::new))
    }
}

#[async_trait]
impl InviteBackend for ApiClient {
    fn set_authorization(&self, credential: &Credential) {
        ApiClient::set_authorization(self, credential);
    }

    async fn accept_invite(
        &self,
        invitation: &InvitationToken,
    ) -> Result<Option<ActivatedCredential>> {
        ApiClient::accept_invite(self, invitation).await
    }
}
