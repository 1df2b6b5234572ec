use super::{Delivery, IWhatsappSender};
use crate::config::WhatsappConfig;
use reqwest::Client;
use std::time::Duration;
use tracing::{error, info, warn};

/// Sends WhatsApp messages through the WhatsApp Business Cloud API.
/// Degrades gracefully: without API configuration the message is logged and
/// the send resolves to `skipped`.
pub struct WhatsappCloudSender {
    client: Client,
    config: WhatsappConfig,
    timeout: Duration,
}

impl WhatsappCloudSender {
    pub fn new(config: &WhatsappConfig, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
            timeout,
        }
    }
}

#[async_trait::async_trait]
impl IWhatsappSender for WhatsappCloudSender {
    async fn send(&self, to: &str, message: &str) -> Delivery {
        if !self.config.is_configured() {
            warn!("WhatsApp API not configured, message for {} logged only", to);
            info!("WhatsApp message for {}:\n{}", to, message);
            return Delivery::skipped("WhatsApp API not configured");
        }

        let body = serde_json::json!({
            "messaging_product": "whatsapp",
            "to": to,
            "type": "text",
            "text": { "body": message },
        });

        let res = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await;

        match res {
            Ok(res) if res.status().is_success() => {
                info!("WhatsApp message sent to {}", to);
                Delivery::sent(format!("HTTP {}", res.status()))
            }
            Ok(res) => {
                let status = res.status();
                let error_body = res.text().await.unwrap_or_default();
                error!("Failed to send WhatsApp to {}: HTTP {}", to, status);
                Delivery::failed(format!("HTTP {}: {}", status, error_body))
            }
            Err(e) => {
                error!("Failed to send WhatsApp to {}: {:?}", to, e);
                Delivery::failed(e.to_string())
            }
        }
    }
}
