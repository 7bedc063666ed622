use async_trait::async_trait;
use serde::Serialize;

use super::{check_status, join_url};
use crate::config::TelegramConfig;
use crate::notify::{AlertMessage, ChannelError, NotificationChannel};

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Telegram Bot API `sendMessage`.
pub struct TelegramChannel {
    config: TelegramConfig,
    http: reqwest::Client,
}

impl TelegramChannel {
    pub fn new(config: TelegramConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    fn endpoint(&self) -> String {
        join_url(
            &self.config.api_base,
            &format!("bot{}/sendMessage", self.config.bot_token),
        )
    }
}

#[async_trait]
impl NotificationChannel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    async fn attempt(&self, message: &AlertMessage) -> Result<(), ChannelError> {
        let body = message.body();
        let response = self
            .http
            .post(self.endpoint())
            .json(&SendMessage {
                chat_id: &self.config.chat_id,
                text: &body,
            })
            .send()
            .await?;
        check_status(&response)
    }
}
