use async_trait::async_trait;

use super::check_status;
use crate::config::defaults::PUSHOVER_MESSAGES_URL;
use crate::config::PushoverConfig;
use crate::notify::{AlertMessage, ChannelError, NotificationChannel};

/// Pushover messages API (form-encoded POST).
pub struct PushoverChannel {
    config: PushoverConfig,
    title: String,
    http: reqwest::Client,
}

impl PushoverChannel {
    pub fn new(config: PushoverConfig, title: String, http: reqwest::Client) -> Self {
        Self {
            config,
            title,
            http,
        }
    }
}

#[async_trait]
impl NotificationChannel for PushoverChannel {
    fn name(&self) -> &str {
        "pushover"
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    async fn attempt(&self, message: &AlertMessage) -> Result<(), ChannelError> {
        let body = message.body();
        let params = [
            ("token", self.config.app_token.as_str()),
            ("user", self.config.user_key.as_str()),
            ("title", self.title.as_str()),
            ("message", body.as_str()),
        ];
        let response = self
            .http
            .post(PUSHOVER_MESSAGES_URL)
            .form(&params)
            .send()
            .await?;
        check_status(&response)
    }
}
