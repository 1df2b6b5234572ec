use chrono::{DateTime, Utc};
use lifereminder_domain::{Channel, DeliveryStatus, NotificationLogEntry, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationLogDTO {
    pub id: ID,
    pub user_id: ID,
    pub channel: Channel,
    pub reminder_ids: Vec<ID>,
    pub status: DeliveryStatus,
    pub message: String,
    pub sent_at: DateTime<Utc>,
}

impl NotificationLogDTO {
    pub fn new(entry: NotificationLogEntry) -> Self {
        Self {
            id: entry.id,
            user_id: entry.user_id,
            channel: entry.channel,
            reminder_ids: entry.reminder_ids,
            status: entry.status,
            message: entry.message,
            sent_at: entry.sent_at,
        }
    }
}
