use async_trait::async_trait;
use serde::Serialize;

use super::{check_status, join_url};
use crate::config::SignalConfig;
use crate::notify::{AlertMessage, ChannelError, NotificationChannel};

#[derive(Serialize)]
struct SendRequest<'a> {
    message: &'a str,
    number: &'a str,
    recipients: &'a [String],
}

/// signal-cli REST API. One request fans out to every recipient.
pub struct SignalChannel {
    config: SignalConfig,
    http: reqwest::Client,
}

impl SignalChannel {
    pub fn new(config: SignalConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }
}

#[async_trait]
impl NotificationChannel for SignalChannel {
    fn name(&self) -> &str {
        "signal"
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    async fn attempt(&self, message: &AlertMessage) -> Result<(), ChannelError> {
        let body = message.body();
        let response = self
            .http
            .post(join_url(&self.config.api_url, "v2/send"))
            .json(&SendRequest {
                message: &body,
                number: &self.config.phone_number,
                recipients: &self.config.recipients,
            })
            .send()
            .await?;
        check_status(&response)
    }
}
