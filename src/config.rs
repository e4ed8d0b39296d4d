/// Configuration constants for the invite API
pub mod api {
    /// Invites endpoint prefix (accept path is `{INVITES}/{token}/accept`)
    pub const INVITES: &str = "/v1/invites";

    /// Organizations endpoint; also the query key segment for organization data
    pub const ORGANIZATIONS: &str = "/v1/organizations";

    /// Environment variable for the API base URL
    pub const URL_ENV_VAR: &str = "INVITECTL_API_URL";

    /// Connect timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Whole-request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// Configuration constants for session credentials
pub mod session {
    /// Session directory name (relative to HOME)
    pub const DIR_NAME: &str = ".invitectl";

    /// Session file name
    pub const FILE_NAME: &str = "session.json";

    /// Environment variable names for the pending token (checked in order)
    pub const TOKEN_ENV_VARS: &[&str] = &["INVITECTL_TOKEN", "INVITE_TOKEN"];
}

/// Post-acceptance behaviour
pub mod flow {
    /// Route the user lands on after a successful acceptance
    pub const LANDING_ROUTE: &str = "/templates";

    /// The one message shown for every kind of acceptance failure
    pub const FAILURE_MESSAGE: &str = "Failed to accept an invite.";
}

/// Default values for CLI
pub mod defaults {
    /// Default API base URL
    pub const API_URL: &str = "http://localhost:3000";

    /// Default log level
    pub const LOG_LEVEL: &str = "warn";
}
