//! HTTP client for the invite API

use log::debug;
use reqwest::Client;
use std::sync::RwLock;
use std::time::Duration;

use crate::config::api;
use crate::error::InviteError;
use crate::session::Credential;

use super::models::ApiErrorEnvelope;

/// Invite API client
///
/// Holds an ambient authorization context that is applied to every
/// request built after it is set.
pub struct ApiClient {
    client: Client,
    base_url: String,
    authorization: RwLock<Option<Credential>>,
}

impl ApiClient {
    /// Create a new client with connection timeouts
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(api::CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(api::REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            authorization: RwLock::new(None),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set the credential sent as `Authorization: Bearer` on later requests
    pub fn set_authorization(&self, credential: &Credential) {
        debug!("Applying authorization {}", credential.redacted());
        let mut slot = self
            .authorization
            .write()
            .unwrap_or_else(|e| e.into_inner());
        *slot = Some(credential.clone());
    }

    /// Currently applied credential
    pub fn authorization(&self) -> Option<Credential> {
        self.authorization
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Build the full URL for an API path
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Add standard headers to a request builder
    fn with_headers(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = builder.header("Content-Type", "application/json");
        match self.authorization() {
            Some(credential) => {
                builder.header("Authorization", format!("Bearer {}", credential.expose()))
            }
            None => builder,
        }
    }

    /// Create a GET request builder with standard headers
    pub(crate) fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.with_headers(self.client.get(url))
    }

    /// Create a POST request builder with standard headers
    pub(crate) fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.with_headers(self.client.post(url))
    }

    /// Turn a non-success response into `InviteError::Api`
    ///
    /// Uses the `{error, message, statusCode}` envelope when the body has
    /// one, the raw body text otherwise.
    pub(crate) async fn error_from_response(response: reqwest::Response) -> InviteError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        match serde_json::from_str::<ApiErrorEnvelope>(&body) {
            Ok(envelope) => {
                let message = envelope.message_text();
                InviteError::Api {
                    status: envelope.status_code.unwrap_or(status.as_u16()),
                    error: envelope.error.unwrap_or_else(|| {
                        status.canonical_reason().unwrap_or("error").to_string()
                    }),
                    message,
                }
            }
            Err(_) => InviteError::Api {
                status: status.as_u16(),
                error: status.canonical_reason().unwrap_or("error").to_string(),
                message: body,
            },
        }
    }
}
