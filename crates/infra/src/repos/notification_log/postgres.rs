use super::INotificationLogRepo;
use chrono::{DateTime, Utc};
use lifereminder_domain::{Channel, DeliveryStatus, NotificationLogEntry, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresNotificationLogRepo {
    pool: PgPool,
}

impl PostgresNotificationLogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationLogRaw {
    log_uid: Uuid,
    user_uid: Uuid,
    channel: String,
    reminder_uids: Vec<Uuid>,
    status: String,
    message: String,
    sent_at: DateTime<Utc>,
}

impl From<NotificationLogRaw> for NotificationLogEntry {
    fn from(raw: NotificationLogRaw) -> Self {
        Self {
            id: raw.log_uid.into(),
            user_id: raw.user_uid.into(),
            channel: raw.channel.parse().unwrap_or(Channel::Email),
            reminder_ids: raw.reminder_uids.into_iter().map(|uid| uid.into()).collect(),
            status: raw.status.parse().unwrap_or(DeliveryStatus::Failed),
            message: raw.message,
            sent_at: raw.sent_at,
        }
    }
}

#[async_trait::async_trait]
impl INotificationLogRepo for PostgresNotificationLogRepo {
    async fn insert(&self, entry: &NotificationLogEntry) -> anyhow::Result<()> {
        let reminder_uids = entry
            .reminder_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();

        sqlx::query(
            r#"
            INSERT INTO notification_logs
            (log_uid, user_uid, channel, reminder_uids, status, message, sent_at)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(entry.id.inner_ref())
        .bind(entry.user_id.inner_ref())
        .bind(entry.channel.as_str())
        .bind(&reminder_uids)
        .bind(entry.status.as_str())
        .bind(&entry.message)
        .bind(entry.sent_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<NotificationLogEntry> {
        sqlx::query_as::<_, NotificationLogRaw>(
            r#"
            SELECT l.log_uid, l.user_uid, l.channel, l.reminder_uids, l.status,
                   l.message, l.sent_at
            FROM notification_logs AS l
            WHERE l.user_uid = $1
            ORDER BY l.sent_at DESC
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|entry| entry.into())
        .collect()
    }
}
