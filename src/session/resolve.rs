//! API URL and pending token resolution from multiple sources

use log::debug;

use crate::config::{api, defaults, session as session_config};
use crate::error::{InviteError, Result};

use super::models::{Credential, SessionFile};

/// Token resolution with fallback logic
pub struct TokenResolver<'a> {
    session: &'a SessionFile,
}

impl<'a> TokenResolver<'a> {
    pub fn new(session: &'a SessionFile) -> Self {
        Self { session }
    }

    /// Resolve the pending credential with fallback:
    /// 1. CLI argument (if provided)
    /// 2. Environment variables (INVITECTL_TOKEN, INVITE_TOKEN - in order)
    /// 3. Token stored in the session file
    pub fn resolve(&self, cli_token: Option<&str>) -> Result<Credential> {
        if let Some(token) = cli_token.filter(|t| !t.trim().is_empty()) {
            debug!("Using token from CLI argument");
            return Ok(Credential::new(token));
        }

        for env_var in session_config::TOKEN_ENV_VARS {
            if let Ok(token) = std::env::var(env_var) {
                if !token.trim().is_empty() {
                    debug!("Using token from {} environment variable", env_var);
                    return Ok(Credential::new(token));
                }
            }
        }

        match &self.session.token {
            Some(token) if !token.is_empty() => {
                debug!("Using token from session file");
                Ok(token.clone())
            }
            _ => Err(InviteError::TokenNotFound(Self::token_not_found_message())),
        }
    }

    fn token_not_found_message() -> String {
        let env_vars = session_config::TOKEN_ENV_VARS.join(", ");
        format!(
            "No session token found. Please provide one using one of:\n\
             \n\
             1. CLI argument:      invitectl --token <TOKEN> accept <INVITE>\n\
             2. Environment var:   export INVITECTL_TOKEN=<TOKEN>  (also: INVITE_TOKEN)\n\
             \n\
             Checked: env vars [{}] and the session file",
            env_vars
        )
    }
}

/// API base URL resolution with fallback logic
pub struct ApiUrlResolver;

impl ApiUrlResolver {
    /// Resolve the API base URL:
    /// 1. CLI argument (if provided)
    /// 2. INVITECTL_API_URL environment variable
    /// 3. api-url stored in the session file
    /// 4. Built-in default
    pub fn resolve(cli_url: Option<&str>, session: &SessionFile) -> Result<String> {
        let url = if let Some(url) = cli_url {
            debug!("Using API URL from CLI argument: {}", url);
            url.to_string()
        } else if let Ok(url) = std::env::var(api::URL_ENV_VAR) {
            debug!(
                "Using API URL from {} environment variable: {}",
                api::URL_ENV_VAR,
                url
            );
            url
        } else if let Some(url) = &session.api_url {
            debug!("Using API URL from session file: {}", url);
            url.clone()
        } else {
            debug!("Using default API URL: {}", defaults::API_URL);
            defaults::API_URL.to_string()
        };

        Self::normalize(&url)
    }

    /// Require a scheme and strip trailing slashes
    fn normalize(url: &str) -> Result<String> {
        let trimmed = url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(InviteError::Config(format!(
                "API URL '{}' must start with http:// or https://",
                url
            )));
        }
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_token_takes_precedence() {
        let session = SessionFile {
            api_url: None,
            token: Some(Credential::new("from-file")),
        };
        let token = TokenResolver::new(&session)
            .resolve(Some("cli-token-123"))
            .unwrap();
        assert_eq!(token.expose(), "cli-token-123");
    }

    #[test]
    fn test_token_not_found_message_format() {
        let msg = TokenResolver::token_not_found_message();
        assert!(msg.contains("invitectl --token"));
        assert!(msg.contains("INVITECTL_TOKEN"));
    }

    #[test]
    fn test_cli_url_takes_precedence_and_is_normalized() {
        let session = SessionFile {
            api_url: Some("http://from-file".to_string()),
            token: None,
        };
        let url = ApiUrlResolver::resolve(Some("https://api.example.com/"), &session).unwrap();
        assert_eq!(url, "https://api.example.com");
    }

    #[test]
    fn test_url_without_scheme_rejected() {
        let err = ApiUrlResolver::resolve(Some("api.example.com"), &SessionFile::default())
            .unwrap_err();
        assert!(err.to_string().contains("must start with http"));
    }
}
