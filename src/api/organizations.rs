//! Organization API operations

use log::debug;

use crate::config::api;
use crate::error::Result;

use super::client::ApiClient;
use super::models::{Organization, OrganizationsResponse};

impl ApiClient {
    /// List organizations visible to the applied credential
    pub async fn get_organizations(&self) -> Result<Vec<Organization>> {
        let url = self.url(api::ORGANIZATIONS);
        debug!("Fetching organizations from: {}", url);

        let response = self.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let parsed: OrganizationsResponse = response.json().await?;
        let organizations = parsed.into_data();
        debug!("Fetched {} organizations", organizations.len());
        Ok(organizations)
    }
}
