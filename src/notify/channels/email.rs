//! SMTP delivery with STARTTLS. Mail goes from and to the configured address.

use async_trait::async_trait;
use std::time::Duration;

use crate::config::EmailConfig;
use crate::notify::{AlertMessage, ChannelError, NotificationChannel};

pub struct EmailChannel {
    config: EmailConfig,
    subject: String,
    timeout: Duration,
}

impl EmailChannel {
    pub fn new(config: EmailConfig, subject: String, timeout: Duration) -> Self {
        Self {
            config,
            subject,
            timeout,
        }
    }

    #[cfg(feature = "email")]
    async fn send(&self, message: &AlertMessage) -> Result<(), ChannelError> {
        use lettre::message::header::ContentType;
        use lettre::message::Mailbox;
        use lettre::transport::smtp::authentication::Credentials;
        use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

        let mailbox: Mailbox = self.config.address.parse()?;

        let email = Message::builder()
            .from(mailbox.clone())
            .to(mailbox)
            .subject(self.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(message.body())?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_server)?
            .port(self.config.smtp_port)
            .credentials(Credentials::new(
                self.config.address.clone(),
                self.config.app_password.clone(),
            ))
            .timeout(Some(self.timeout))
            .build();

        transport.send(email).await?;
        Ok(())
    }

    #[cfg(not(feature = "email"))]
    async fn send(&self, _message: &AlertMessage) -> Result<(), ChannelError> {
        let _ = self.timeout;
        Err(ChannelError::Unsupported(
            "built without the `email` feature".to_string(),
        ))
    }
}

#[async_trait]
impl NotificationChannel for EmailChannel {
    fn name(&self) -> &str {
        "email"
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    async fn attempt(&self, message: &AlertMessage) -> Result<(), ChannelError> {
        self.send(message).await
    }
}
