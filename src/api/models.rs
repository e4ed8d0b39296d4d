//! Invite API wire models

use serde::{Deserialize, Serialize};

/// Error envelope returned by the backend on failure
#[derive(Deserialize, Debug, Default)]
pub struct ApiErrorEnvelope {
    #[serde(default)]
    pub error: Option<String>,
    /// Either a string or a list of validation messages
    #[serde(default)]
    pub message: Option<serde_json::Value>,
    #[serde(rename = "statusCode", default)]
    pub status_code: Option<u16>,
}

impl ApiErrorEnvelope {
    /// Message flattened to one line
    pub fn message_text(&self) -> String {
        match &self.message {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .map(|v| match v {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join("; "),
            Some(serde_json::Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

/// `{ "token": ... }` body of a successful accept
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct TokenEnvelope {
    #[serde(default)]
    pub token: Option<String>,
}

/// Successful accept response: `{ "token": ... }` or a bare JSON string
///
/// Any other object shape fails to decode.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum AcceptInviteResponse {
    Envelope(TokenEnvelope),
    Bare(String),
}

impl AcceptInviteResponse {
    /// The new credential, if the backend sent a non-empty one
    pub fn into_token(self) -> Option<String> {
        let token = match self {
            AcceptInviteResponse::Envelope(envelope) => envelope.token,
            AcceptInviteResponse::Bare(token) => Some(token),
        };
        token.filter(|t| !t.trim().is_empty())
    }
}

/// An organization the current session can see
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Organization {
    pub id: String,
    pub name: String,
}

/// Organization listing: bare array or `{ "data": [...] }`
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum OrganizationsResponse {
    List(Vec<Organization>),
    Wrapped { data: Vec<Organization> },
}

impl OrganizationsResponse {
    pub fn into_data(self) -> Vec<Organization> {
        match self {
            OrganizationsResponse::List(items) => items,
            OrganizationsResponse::Wrapped { data } => data,
        }
    }
}
