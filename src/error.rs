use std::fmt;

/// Error type for API, session and cache operations
#[derive(Debug)]
pub enum InviteError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// API returned an error response
    Api {
        status: u16,
        error: String,
        message: String,
    },
    /// Token not found in any source
    TokenNotFound(String),
    /// Failed to read or write the session file
    Session(String),
    /// Query cache invalidation or refetch failed
    Cache(String),
    /// JSON parsing error
    Json(String),
    /// Configuration error
    Config(String),
}

impl fmt::Display for InviteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InviteError::Http(e) => write!(f, "HTTP request failed: {}", e),
            InviteError::Api {
                status,
                error,
                message,
            } => {
                write!(f, "API error (status {}): {}: {}", status, error, message)
            }
            InviteError::TokenNotFound(msg) => write!(f, "{}", msg),
            InviteError::Session(msg) => write!(f, "Session error: {}", msg),
            InviteError::Cache(msg) => write!(f, "Cache error: {}", msg),
            InviteError::Json(msg) => write!(f, "JSON error: {}", msg),
            InviteError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for InviteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InviteError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for InviteError {
    fn from(err: reqwest::Error) -> Self {
        InviteError::Http(err)
    }
}

impl From<serde_json::Error> for InviteError {
    fn from(err: serde_json::Error) -> Self {
        InviteError::Json(err.to_string())
    }
}

impl From<std::io::Error> for InviteError {
    fn from(err: std::io::Error) -> Self {
        InviteError::Session(err.to_string())
    }
}

/// Result type alias for invite operations
pub type Result<T> = std::result::Result<T, InviteError>;

/// Pipeline stage after the network call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownstreamStage {
    /// Replacing the active credential
    SessionStore,
    /// Invalidating organization queries
    CacheInvalidation,
}

impl fmt::Display for DownstreamStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownstreamStage::SessionStore => write!(f, "session-store"),
            DownstreamStage::CacheInvalidation => write!(f, "cache-invalidation"),
        }
    }
}

/// Why an invite acceptance failed
///
/// Users always see the same generic message; callers and tests can
/// still match on the kind.
#[derive(Debug)]
pub enum AcceptInviteFailure {
    /// Transport failure or an unreadable response
    NetworkFailure(InviteError),
    /// Backend answered with an error envelope
    RejectedByBackend {
        status: u16,
        error: String,
        message: String,
    },
    /// A step after the network call failed
    DownstreamFailure {
        stage: DownstreamStage,
        source: InviteError,
    },
}

impl AcceptInviteFailure {
    /// Classify an error from the network step
    pub fn from_network(err: InviteError) -> Self {
        match err {
            InviteError::Api {
                status,
                error,
                message,
            } => AcceptInviteFailure::RejectedByBackend {
                status,
                error,
                message,
            },
            other => AcceptInviteFailure::NetworkFailure(other),
        }
    }

    /// Short machine-readable kind, used in telemetry
    pub fn kind(&self) -> &'static str {
        match self {
            AcceptInviteFailure::NetworkFailure(_) => "network_failure",
            AcceptInviteFailure::RejectedByBackend { .. } => "rejected_by_backend",
            AcceptInviteFailure::DownstreamFailure { .. } => "downstream_failure",
        }
    }
}

impl fmt::Display for AcceptInviteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcceptInviteFailure::NetworkFailure(e) => write!(f, "network failure: {}", e),
            AcceptInviteFailure::RejectedByBackend {
                status,
                error,
                message,
            } => write!(
                f,
                "rejected by backend (status {}): {}: {}",
                status, error, message
            ),
            AcceptInviteFailure::DownstreamFailure { stage, source } => {
                write!(f, "{} failed: {}", stage, source)
            }
        }
    }
}

impl std::error::Error for AcceptInviteFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AcceptInviteFailure::NetworkFailure(e) => Some(e),
            AcceptInviteFailure::DownstreamFailure { source, .. } => Some(source),
            AcceptInviteFailure::RejectedByBackend { .. } => None,
        }
    }
}
