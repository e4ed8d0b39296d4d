//! Credential and session file data models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Visible prefix length when a credential is printed for diagnostics
const REDACTED_PREFIX_LEN: usize = 4;

/// An opaque session credential (bearer token)
///
/// `Debug` and `Display` never print the full value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

/// Credential held before the invite is accepted
pub type PendingCredential = Credential;

/// Credential returned by the backend after acceptance
pub type ActivatedCredential = Credential;

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Raw token value, for the Authorization header
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Redacted form safe for logs and terminal output
    pub fn redacted(&self) -> String {
        let prefix: String = self.0.chars().take(REDACTED_PREFIX_LEN).collect();
        if self.0.chars().count() <= REDACTED_PREFIX_LEN {
            "****".to_string()
        } else {
            format!("{}****", prefix)
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.redacted()).finish()
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.redacted())
    }
}

impl From<&str> for Credential {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Credential {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Opaque single-use invitation identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitationToken(String);

impl InvitationToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Token encoded for use as a single URL path segment
    pub fn path_segment(&self) -> String {
        urlencoding::encode(&self.0).into_owned()
    }
}

impl fmt::Display for InvitationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for InvitationToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// On-disk session state
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct SessionFile {
    /// API base URL the session belongs to
    #[serde(rename = "api-url", skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// Active credential
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<Credential>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_debug_is_redacted() {
        let cred = Credential::new("session-xyz-very-secret");
        let debug = format!("{:?}", cred);
        assert!(debug.contains("sess****"));
        assert!(!debug.contains("very-secret"));
    }

    #[test]
    fn test_short_credential_fully_masked() {
        let cred = Credential::new("abc");
        assert_eq!(cred.redacted(), "****");
        assert_eq!(cred.to_string(), "****");
    }

    #[test]
    fn test_credential_expose() {
        let cred = Credential::from("pending-abc");
        assert_eq!(cred.expose(), "pending-abc");
    }

    #[test]
    fn test_blank_credential_is_empty() {
        assert!(Credential::new("").is_empty());
        assert!(Credential::new("   ").is_empty());
        assert!(!Credential::new("x").is_empty());
    }

    #[test]
    fn test_invitation_path_segment_is_encoded() {
        let token = InvitationToken::from("inv/123 x");
        assert_eq!(token.path_segment(), "inv%2F123%20x");
        assert_eq!(token.as_str(), "inv/123 x");
    }

    #[test]
    fn test_session_file_serializes_token_transparently() {
        let file = SessionFile {
            api_url: Some("http://localhost:3000".to_string()),
            token: Some(Credential::new("session-xyz")),
        };
        let json = serde_json::to_string(&file).unwrap();
        assert!(json.contains("\"token\":\"session-xyz\""));
        assert!(json.contains("\"api-url\""));
    }

    #[test]
    fn test_session_file_skips_missing_fields() {
        let json = serde_json::to_string(&SessionFile::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_deserialize_empty_json() {
        let file: SessionFile = serde_json::from_str("{}").unwrap();
        assert!(file.api_url.is_none());
        assert!(file.token.is_none());
    }
}
