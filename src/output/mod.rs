//! Output formatting for command results

use comfy_table::{presets::NOTHING, Table};
use serde::Serialize;
use std::path::Path;

use crate::api::Organization;
use crate::cli::OutputFormat;
use crate::session::{Credential, SessionFile};

/// Serializable result of an accepted invitation
#[derive(Serialize, Debug)]
pub struct AcceptSummary {
    pub invitation: String,
    /// Redacted activated credential
    pub session: String,
    pub landing_route: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub organizations: Vec<Organization>,
}

impl AcceptSummary {
    pub fn new(
        invitation: &str,
        credential: &Credential,
        landing_route: &str,
        organizations: Vec<Organization>,
    ) -> Self {
        Self {
            invitation: invitation.to_string(),
            session: credential.redacted(),
            landing_route: landing_route.to_string(),
            organizations,
        }
    }
}

/// Output an accept summary in the requested format
pub fn output_accept_summary(summary: &AcceptSummary, format: OutputFormat) {
    match format {
        OutputFormat::Table => println!("{}", accept_table(summary)),
        OutputFormat::Json => print_json(summary),
    }
}

fn accept_table(summary: &AcceptSummary) -> String {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.add_row(vec!["Invitation", summary.invitation.as_str()]);
    table.add_row(vec!["Session", summary.session.as_str()]);
    table.add_row(vec!["Landing", summary.landing_route.as_str()]);
    let mut out = table.to_string();

    if !summary.organizations.is_empty() {
        let mut orgs = Table::new();
        orgs.load_preset(NOTHING);
        orgs.set_header(vec!["Organization", "ID"]);
        for org in &summary.organizations {
            orgs.add_row(vec![org.name.as_str(), org.id.as_str()]);
        }
        out.push_str("\n\n");
        out.push_str(&orgs.to_string());
    }
    out
}

/// Serializable view of the stored session
#[derive(Serialize, Debug)]
pub struct SessionView {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// Redacted token, if one is stored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl SessionView {
    pub fn new(path: &Path, session: &SessionFile) -> Self {
        Self {
            path: path.display().to_string(),
            api_url: session.api_url.clone(),
            token: session.token.as_ref().map(Credential::redacted),
        }
    }
}

/// Output the stored session in the requested format
pub fn output_session(view: &SessionView, format: OutputFormat) {
    match format {
        OutputFormat::Table => println!("{}", session_table(view)),
        OutputFormat::Json => print_json(view),
    }
}

fn session_table(view: &SessionView) -> String {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.add_row(vec!["File", view.path.as_str()]);
    table.add_row(vec!["API URL", view.api_url.as_deref().unwrap_or("-")]);
    table.add_row(vec!["Token", view.token.as_deref().unwrap_or("(none)")]);
    table.to_string()
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing to JSON: {}", e),
    }
}
