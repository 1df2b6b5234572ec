mod email;
mod whatsapp;

use crate::config::Config;
pub use email::SmtpEmailSender;
use lifereminder_domain::DeliveryStatus;
use std::sync::Arc;
pub use whatsapp::WhatsappCloudSender;

/// Typed outcome of a channel-send call. Senders never raise, every failure
/// mode surfaces through the status and detail pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub status: DeliveryStatus,
    /// Provider message id, error text or skip reason
    pub detail: String,
}

impl Delivery {
    pub fn sent(detail: impl Into<String>) -> Self {
        Self {
            status: DeliveryStatus::Sent,
            detail: detail.into(),
        }
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            status: DeliveryStatus::Failed,
            detail: detail.into(),
        }
    }

    pub fn skipped(detail: impl Into<String>) -> Self {
        Self {
            status: DeliveryStatus::Skipped,
            detail: detail.into(),
        }
    }
}

/// Rendered payload for an email-like channel
#[derive(Debug, Clone, PartialEq)]
pub struct EmailPayload {
    pub subject: String,
    pub html: String,
}

#[async_trait::async_trait]
pub trait IEmailSender: Send + Sync {
    async fn send(&self, to: Option<&str>, email: &EmailPayload) -> Delivery;
}

#[async_trait::async_trait]
pub trait IWhatsappSender: Send + Sync {
    async fn send(&self, to: &str, message: &str) -> Delivery;
}

/// The channel senders for one process, constructed once at startup and
/// never re-created mid-run.
#[derive(Clone)]
pub struct Channels {
    pub email: Arc<dyn IEmailSender>,
    pub whatsapp: Arc<dyn IWhatsappSender>,
}

impl Channels {
    pub fn create(config: &Config) -> Self {
        let timeout = config.notifications.send_timeout;
        Self {
            email: Arc::new(SmtpEmailSender::new(&config.smtp, timeout)),
            whatsapp: Arc::new(WhatsappCloudSender::new(&config.whatsapp, timeout)),
        }
    }
}
