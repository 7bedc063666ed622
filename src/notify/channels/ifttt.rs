use async_trait::async_trait;

use super::check_status;
use crate::config::defaults::IFTTT_TRIGGER_BASE;
use crate::config::IftttConfig;
use crate::notify::{AlertMessage, ChannelError, NotificationChannel};

/// IFTTT Maker webhook; the body travels as `value1`.
pub struct IftttChannel {
    config: IftttConfig,
    http: reqwest::Client,
}

impl IftttChannel {
    pub fn new(config: IftttConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    fn endpoint(&self) -> String {
        format!(
            "{IFTTT_TRIGGER_BASE}/{}/with/key/{}",
            self.config.webhook_event, self.config.webhook_key
        )
    }
}

#[async_trait]
impl NotificationChannel for IftttChannel {
    fn name(&self) -> &str {
        "ifttt"
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    async fn attempt(&self, message: &AlertMessage) -> Result<(), ChannelError> {
        let payload = serde_json::json!({ "value1": message.body() });
        let response = self.http.post(self.endpoint()).json(&payload).send().await?;
        check_status(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_includes_event_and_key() {
        let channel = IftttChannel::new(
            IftttConfig {
                webhook_event: "bird_alert".to_string(),
                webhook_key: "k3y".to_string(),
            },
            reqwest::Client::new(),
        );
        assert_eq!(
            channel.endpoint(),
            "https://maker.ifttt.com/trigger/bird_alert/with/key/k3y"
        );
    }
}
