//! Notification dispatch: ordered channel fallback.
//!
//! A [`Dispatcher`] holds the configured channels in priority order and
//! tries them one at a time until one succeeds. Channels that lack
//! credentials are recorded as failures without any network I/O. Channel
//! errors never escape `dispatch`; they become failed [`ChannelResult`]s.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::{ChannelKind, NotificationConfig};

pub mod channels;
mod message;

pub use message::AlertMessage;

/// Why a single channel attempt failed.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("channel is not configured")]
    NotConfigured,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned status {0}")]
    Status(reqwest::StatusCode),
    #[cfg(feature = "email")]
    #[error("invalid email address: {0}")]
    EmailAddress(#[from] lettre::address::AddressError),
    #[cfg(feature = "email")]
    #[error("failed to build email: {0}")]
    EmailMessage(#[from] lettre::error::Error),
    #[cfg(feature = "email")]
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error("unsupported: {0}")]
    Unsupported(String),
}

/// One delivery mechanism.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Name used in logs and results (e.g. "email", "telegram").
    fn name(&self) -> &str;

    /// Whether the channel has the credentials it needs. Checked before
    /// every attempt; `false` means the channel is skipped without I/O.
    fn is_configured(&self) -> bool;

    /// Try to deliver the alert once. No retries.
    async fn attempt(&self, message: &AlertMessage) -> Result<(), ChannelError>;
}

/// Outcome of trying one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelResult {
    pub channel: String,
    pub success: bool,
    /// Failure description; `None` on success.
    pub reason: Option<String>,
}

impl ChannelResult {
    fn delivered(channel: &str) -> Self {
        Self {
            channel: channel.to_string(),
            success: true,
            reason: None,
        }
    }

    fn failed(channel: &str, reason: impl Into<String>) -> Self {
        Self {
            channel: channel.to_string(),
            success: false,
            reason: Some(reason.into()),
        }
    }
}

/// Per-channel results of one dispatch, in the order they were tried.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchOutcome {
    pub results: Vec<ChannelResult>,
}

impl DispatchOutcome {
    pub fn delivered(&self) -> bool {
        self.results.iter().any(|r| r.success)
    }

    /// Name of the channel that delivered the alert.
    pub fn delivered_by(&self) -> Option<&str> {
        self.results
            .iter()
            .find(|r| r.success)
            .map(|r| r.channel.as_str())
    }
}

/// Tries channels in priority order until one succeeds.
pub struct Dispatcher {
    channels: Vec<Box<dyn NotificationChannel>>,
}

impl Dispatcher {
    pub fn new(channels: Vec<Box<dyn NotificationChannel>>) -> Self {
        Self { channels }
    }

    /// Build the channel list named by `notifications.order`.
    ///
    /// HTTP channels share one client carrying the configured timeout.
    pub fn from_config(config: &NotificationConfig) -> Result<Self, ChannelError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("bird-alert/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let channels = config
            .order
            .iter()
            .map(|kind| -> Box<dyn NotificationChannel> {
                match kind {
                    ChannelKind::Email => Box::new(channels::EmailChannel::new(
                        config.email.clone(),
                        config.subject.clone(),
                        timeout,
                    )),
                    ChannelKind::Telegram => {
                        Box::new(channels::TelegramChannel::new(config.telegram.clone(), http.clone()))
                    }
                    ChannelKind::Pushover => Box::new(channels::PushoverChannel::new(
                        config.pushover.clone(),
                        config.subject.clone(),
                        http.clone(),
                    )),
                    ChannelKind::Ifttt => {
                        Box::new(channels::IftttChannel::new(config.ifttt.clone(), http.clone()))
                    }
                    ChannelKind::Signal => {
                        Box::new(channels::SignalChannel::new(config.signal.clone(), http.clone()))
                    }
                }
            })
            .collect();

        Ok(Self::new(channels))
    }

    pub fn channel_names(&self) -> Vec<&str> {
        self.channels.iter().map(|c| c.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Deliver through the first channel that succeeds.
    ///
    /// Never fails: a total failure is reported in the outcome and logged.
    pub async fn dispatch(&self, message: &AlertMessage) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();

        for channel in &self.channels {
            let name = channel.name();

            if !channel.is_configured() {
                debug!(channel = name, "Skipping unconfigured channel");
                outcome
                    .results
                    .push(ChannelResult::failed(name, ChannelError::NotConfigured.to_string()));
                continue;
            }

            match channel.attempt(message).await {
                Ok(()) => {
                    info!(channel = name, hex = %message.hex, "Alert delivered");
                    outcome.results.push(ChannelResult::delivered(name));
                    return outcome;
                }
                Err(e) => {
                    warn!(channel = name, hex = %message.hex, error = %e, "Channel delivery failed");
                    outcome.results.push(ChannelResult::failed(name, e.to_string()));
                }
            }
        }

        warn!(
            hex = %message.hex,
            tried = outcome.results.len(),
            "All notification channels failed"
        );
        outcome
    }
}
