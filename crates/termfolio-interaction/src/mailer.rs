//! SMTP delivery of contact form submissions.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use termfolio_core::config::SmtpConfig;
use termfolio_core::error::{FolioError, Result};
use termfolio_core::relay::{MailTransport, OutboundEmail};

/// Port that speaks TLS from the first byte instead of STARTTLS.
const IMPLICIT_TLS_PORT: u16 = 465;

/// Sends mail from the SMTP account to a fixed recipient.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailer {
    /// Builds the transport. Host and user are required; the user doubles
    /// as the sender address.
    pub fn from_config(config: &SmtpConfig, recipient: &str) -> Result<Self> {
        let host = config
            .host
            .as_deref()
            .ok_or_else(|| FolioError::config("SMTP_HOST is not set"))?;
        let user = config
            .user
            .as_deref()
            .ok_or_else(|| FolioError::config("SMTP_USER is not set"))?;

        let from: Mailbox = user
            .parse()
            .map_err(|e| FolioError::config(format!("Invalid SMTP_USER address: {e}")))?;
        let to: Mailbox = recipient
            .parse()
            .map_err(|e| FolioError::config(format!("Invalid recipient address: {e}")))?;

        let builder = if config.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
        }
        .map_err(|e| FolioError::config(format!("Invalid SMTP host {host}: {e}")))?;

        let credentials = Credentials::new(
            user.to_string(),
            config.pass.clone().unwrap_or_default(),
        );
        let transport = builder.port(config.port).credentials(credentials).build();

        tracing::info!("[Mailer] SMTP transport ready ({}:{})", host, config.port);
        Ok(Self {
            transport,
            from,
            to,
        })
    }

    fn build_message(&self, email: OutboundEmail) -> Result<Message> {
        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(email.subject)
            .multipart(MultiPart::alternative_plain_html(email.text, email.html))
            .map_err(|e| FolioError::internal(format!("Failed to build email: {e}")))
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send_email(&self, email: OutboundEmail) -> Result<()> {
        let message = self.build_message(email)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| FolioError::upstream("smtp", e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(host: Option<&str>, user: Option<&str>) -> SmtpConfig {
        SmtpConfig {
            host: host.map(str::to_string),
            user: user.map(str::to_string),
            pass: Some("secret".into()),
            ..SmtpConfig::default()
        }
    }

    #[test]
    fn test_missing_host_is_config_error() {
        let err = SmtpMailer::from_config(&config(None, Some("me@example.com")), "you@example.com")
            .err()
            .unwrap();
        assert!(err.is_config());
    }

    #[test]
    fn test_missing_user_is_config_error() {
        let err = SmtpMailer::from_config(&config(Some("smtp.example.com"), None), "you@example.com")
            .err()
            .unwrap();
        assert!(err.is_config());
    }

    #[tokio::test]
    async fn test_message_has_both_bodies() {
        let mailer = SmtpMailer::from_config(
            &config(Some("smtp.example.com"), Some("me@example.com")),
            "you@example.com",
        )
        .unwrap();
        let message = mailer
            .build_message(OutboundEmail {
                subject: "New Contact Form Submission".into(),
                text: "Name: Ada".into(),
                html: "<p>Name: Ada</p>".into(),
            })
            .unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: New Contact Form Submission"));
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("To: you@example.com"));
    }
}
