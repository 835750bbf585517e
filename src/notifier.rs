//! Alert Delivery
//!
//! The monitoring core hands a non-empty list of modified paths to a
//! `Notifier` and does not care how the alert travels. The production
//! implementation posts a JSON payload to a configured webhook endpoint;
//! `LogNotifier` renders the alert to the log only. Retries, credentials, and
//! timeouts are entirely the notifier's concern.

use crate::error::NotifyError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{info, warn};

/// Default subject line, mirroring the alert the monitor has always sent.
const DEFAULT_SUBJECT: &str = "File Integrity Alert: Files Modified";

/// Delivery timeout applied when the config does not set one.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Outbound alert channel.
///
/// The core guarantees `notify` is only called with a non-empty list drawn
/// from the modified set of a change set. Implementations own the transport.
pub trait Notifier: Send {
    fn notify(&self, modified: &[String]) -> Result<(), NotifyError>;
}

/// Notifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Delivery kind: "log" or "webhook"
    #[serde(default = "default_kind")]
    pub kind: String,

    /// Webhook endpoint URL (required when kind = "webhook")
    #[serde(default)]
    pub url: Option<String>,

    /// Alert subject line
    #[serde(default = "default_subject")]
    pub subject: String,

    /// Delivery timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_kind() -> String {
    "log".to_string()
}

fn default_subject() -> String {
    DEFAULT_SUBJECT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            url: None,
            subject: default_subject(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl NotifierConfig {
    /// Validate notifier configuration
    pub fn validate(&self) -> Result<(), String> {
        match self.kind.as_str() {
            "log" => Ok(()),
            "webhook" => match &self.url {
                Some(url) if url.starts_with("http://") || url.starts_with("https://") => Ok(()),
                Some(url) => Err(format!("webhook url '{}' is not an http(s) URL", url)),
                None => Err("webhook notifier requires a url".to_string()),
            },
            other => Err(format!("unknown notifier kind '{}'", other)),
        }
    }

    /// Build the configured notifier.
    pub fn build(&self) -> Result<Box<dyn Notifier>, NotifyError> {
        self.validate().map_err(NotifyError::Client)?;
        match (self.kind.as_str(), &self.url) {
            ("webhook", Some(url)) => Ok(Box::new(WebhookNotifier::new(
                url.clone(),
                self.subject.clone(),
                Duration::from_secs(self.timeout_secs),
            )?)),
            _ => Ok(Box::new(LogNotifier)),
        }
    }
}

/// Renders the alert into the operator log; no out-of-band delivery.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, modified: &[String]) -> Result<(), NotifyError> {
        warn!(
            modified_count = modified.len(),
            files = ?modified,
            "File integrity alert (log-only notifier)"
        );
        Ok(())
    }
}

/// Posts the alert as JSON to a webhook endpoint.
///
/// The call blocks the monitoring loop until it completes or the configured
/// timeout elapses.
pub struct WebhookNotifier {
    url: String,
    subject: String,
    client: reqwest::blocking::Client,
}

impl WebhookNotifier {
    pub fn new(url: String, subject: String, timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Client(e.to_string()))?;
        Ok(Self {
            url,
            subject,
            client,
        })
    }
}

impl Notifier for WebhookNotifier {
    fn notify(&self, modified: &[String]) -> Result<(), NotifyError> {
        let mut files: Vec<&str> = modified.iter().map(String::as_str).collect();
        files.sort_unstable();

        let body = json!({
            "subject": self.subject,
            "body": "The following files have been modified:",
            "modified": files,
        });

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status.as_u16()));
        }

        info!(
            url = %self.url,
            modified_count = modified.len(),
            "Alert delivered"
        );
        Ok(())
    }
}
