use super::{Delivery, EmailPayload, IEmailSender};
use crate::config::SmtpConfig;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::time::Duration;
use tracing::{error, info, warn};

/// Sends reminder mails over SMTP. Degrades gracefully: without SMTP
/// configuration every send resolves to `skipped` instead of erroring.
pub struct SmtpEmailSender {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
}

impl SmtpEmailSender {
    pub fn new(config: &SmtpConfig, timeout: Duration) -> Self {
        let transport = if config.is_configured() {
            match AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host) {
                Ok(builder) => Some(
                    builder
                        .port(config.port)
                        .credentials(Credentials::new(
                            config.username.clone(),
                            config.password.clone(),
                        ))
                        .timeout(Some(timeout))
                        .build(),
                ),
                Err(e) => {
                    warn!("Could not create SMTP transport for {}: {:?}", config.host, e);
                    None
                }
            }
        } else {
            None
        };

        Self {
            transport,
            from: config.from.clone(),
        }
    }
}

#[async_trait::async_trait]
impl IEmailSender for SmtpEmailSender {
    async fn send(&self, to: Option<&str>, email: &EmailPayload) -> Delivery {
        let to = match to {
            Some(to) => to,
            None => {
                warn!("No recipient email provided, skipping");
                return Delivery::skipped("No recipient email");
            }
        };

        let transport = match &self.transport {
            Some(transport) => transport,
            None => {
                warn!("SMTP not configured, email to {} skipped", to);
                return Delivery::skipped("SMTP not configured");
            }
        };

        let from = match self.from.parse::<Mailbox>() {
            Ok(from) => from,
            Err(e) => return Delivery::failed(format!("Invalid from address: {}", e)),
        };
        let to_mailbox = match to.parse::<Mailbox>() {
            Ok(to_mailbox) => to_mailbox,
            Err(e) => return Delivery::failed(format!("Invalid recipient email: {}", e)),
        };

        let message = match Message::builder()
            .from(from)
            .to(to_mailbox)
            .subject(&email.subject)
            .header(ContentType::TEXT_HTML)
            .body(email.html.clone())
        {
            Ok(message) => message,
            Err(e) => return Delivery::failed(format!("Could not build email: {}", e)),
        };

        match transport.send(message).await {
            Ok(response) => {
                info!("Email sent to {}", to);
                Delivery::sent(format!("SMTP {}", response.code()))
            }
            Err(e) => {
                error!("Failed to send email to {}: {:?}", to, e);
                Delivery::failed(e.to_string())
            }
        }
    }
}
