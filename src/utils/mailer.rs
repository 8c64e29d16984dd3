use anyhow::{Context, Result};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::APP_CONFIG;

/// SMTP delivery used by the mail worker. Handlers never send directly;
/// they publish to the mail queue and this transport drains it.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    pub fn from_config() -> Result<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&APP_CONFIG.smtp_host)
            .context("Failed to create SMTP transport")?
            .port(APP_CONFIG.smtp_port);

        if !APP_CONFIG.smtp_username.is_empty() {
            builder = builder.credentials(Credentials::new(
                APP_CONFIG.smtp_username.clone(),
                APP_CONFIG.smtp_password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from: APP_CONFIG.mail_from.clone(),
        })
    }

    pub async fn send_text(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let message = Message::builder()
            .from(self.from.parse().context("Invalid from address")?)
            .to(to.parse().context("Invalid to address")?)
            .subject(subject)
            .body(body.to_string())
            .context("Failed to build email")?;

        self.transport
            .send(message)
            .await
            .context("Failed to send email")?;

        Ok(())
    }
}
