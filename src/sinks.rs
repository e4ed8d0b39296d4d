//! Terminal and log-backed notification, navigation and telemetry sinks

use log::{error, info};
use std::error::Error;

use crate::error::AcceptInviteFailure;
use crate::flow::{Navigator, Notifier, Severity, Telemetry};

/// Prints notifications to stderr
pub struct TerminalNotifier;

impl TerminalNotifier {
    fn format(message: &str, severity: Severity) -> String {
        match severity {
            Severity::Error => format!("Error: {}", message),
        }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        eprintln!("{}", Self::format(message, severity));
    }
}

/// Reports failures through the `log` facade
pub struct LogTelemetry;

impl LogTelemetry {
    /// Failure plus its chain of sources on one line
    fn describe(failure: &AcceptInviteFailure) -> String {
        let mut text = failure.to_string();
        let mut source = failure.source();
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !text.contains(&cause_text) {
                text.push_str(": ");
                text.push_str(&cause_text);
            }
            source = cause.source();
        }
        text
    }
}

impl Telemetry for LogTelemetry {
    fn report_exception(&self, failure: &AcceptInviteFailure) {
        error!(
            "accept-invite failure [{}]: {}",
            failure.kind(),
            Self::describe(failure)
        );
    }
}

/// "Navigates" by printing where the user should continue
pub struct TerminalNavigator {
    app_url: Option<String>,
}

impl TerminalNavigator {
    /// `app_url` is the web app origin; without it only the route is printed
    pub fn new(app_url: Option<&str>) -> Self {
        Self {
            app_url: app_url.map(|u| u.trim_end_matches('/').to_string()),
        }
    }

    pub fn url_for(&self, route: &str) -> String {
        match &self.app_url {
            Some(base) => format!("{}{}", base, route),
            None => route.to_string(),
        }
    }
}

impl Navigator for TerminalNavigator {
    fn go_to(&self, route: &str) {
        info!("Navigating to {}", route);
        println!("Continue at {}", self.url_for(route));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DownstreamStage, InviteError};

    #[test]
    fn test_notifier_format() {
        assert_eq!(
            TerminalNotifier::format("Failed to accept an invite.", Severity::Error),
            "Error: Failed to accept an invite."
        );
    }

    #[test]
    fn test_navigator_url() {
        let navigator = TerminalNavigator::new(Some("https://app.example.com/"));
        assert_eq!(
            navigator.url_for("/templates"),
            "https://app.example.com/templates"
        );
        assert_eq!(TerminalNavigator::new(None).url_for("/templates"), "/templates");
    }

    #[test]
    fn test_telemetry_description_includes_stage_and_cause() {
        let failure = AcceptInviteFailure::DownstreamFailure {
            stage: DownstreamStage::SessionStore,
            source: InviteError::Session("disk full".to_string()),
        };
        let text = LogTelemetry::describe(&failure);
        assert!(text.contains("session-store"));
        assert!(text.contains("disk full"));
    }
}
