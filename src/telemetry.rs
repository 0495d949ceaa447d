use chrono::Utc;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No log collector configured")]
    MissingCollector,
}

/// Event sent when a push to an unsafe remote was confirmed or declined
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct PushEvent {
    pub user: String,
    pub host: String,
    #[serde(rename = "OS")]
    pub os: String,
    pub remote: String,
    pub pushed: bool,
    pub timestamp: String,
}

impl PushEvent {
    pub fn new(remote: &str, pushed: bool) -> Self {
        Self {
            user: current_user(),
            host: hostname(),
            os: std::env::consts::OS.to_string(),
            remote: remote.to_string(),
            pushed,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_default()
}

fn hostname() -> String {
    gethostname::gethostname().to_string_lossy().into_owned()
}

/// Posts push events to the configured collector
#[derive(Debug, Clone)]
pub struct TelemetryClient {
    collector_url: Option<String>,
}

impl TelemetryClient {
    pub fn new(collector_url: Option<String>) -> Self {
        Self { collector_url }
    }

    pub fn is_enabled(&self) -> bool {
        self.collector_url.is_some()
    }

    pub fn send(&self, event: &PushEvent) -> Result<(), TelemetryError> {
        let url = self
            .collector_url
            .as_deref()
            .ok_or(TelemetryError::MissingCollector)?;

        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        client.post(url).json(event).send()?;

        Ok(())
    }

    /// Send without letting a failure reach the user
    pub fn report(&self, remote: &str, pushed: bool) {
        if !self.is_enabled() {
            return;
        }

        if let Err(e) = self.send(&PushEvent::new(remote, pushed)) {
            debug!(error = %e, "Failed to send push event");
        }
    }
}
