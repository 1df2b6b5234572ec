use super::{IReminderRepo, ReminderWithOwner};
use chrono::{DateTime, NaiveDate, Utc};
use lifereminder_domain::{NotificationPreferences, Reminder, ReminderType, User, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    user_uid: Uuid,
    title: String,
    event_date: NaiveDate,
    reminder_type: String,
    remind_before_days: i32,
    repeat_every_year: bool,
    notes: Option<String>,
    is_active: bool,
    last_notified_at: Option<DateTime<Utc>>,
}

impl From<ReminderRaw> for Reminder {
    fn from(raw: ReminderRaw) -> Self {
        Self {
            id: raw.reminder_uid.into(),
            user_id: raw.user_uid.into(),
            title: raw.title,
            date: raw.event_date,
            reminder_type: raw
                .reminder_type
                .parse()
                .unwrap_or(ReminderType::Custom),
            remind_before_days: raw.remind_before_days as u32,
            repeat_every_year: raw.repeat_every_year,
            notes: raw.notes,
            is_active: raw.is_active,
            last_notified_at: raw.last_notified_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct ReminderWithOwnerRaw {
    reminder_uid: Uuid,
    user_uid: Uuid,
    title: String,
    event_date: NaiveDate,
    reminder_type: String,
    remind_before_days: i32,
    repeat_every_year: bool,
    notes: Option<String>,
    is_active: bool,
    last_notified_at: Option<DateTime<Utc>>,
    // Owner columns from the LEFT JOIN. `owner_phone` is NOT NULL on the
    // users table, so it doubles as the row-presence marker.
    owner_name: Option<String>,
    owner_phone: Option<String>,
    owner_country_code: Option<String>,
    owner_email: Option<String>,
    owner_whatsapp_number: Option<String>,
    owner_email_enabled: Option<bool>,
    owner_whatsapp_enabled: Option<bool>,
}

impl From<ReminderWithOwnerRaw> for ReminderWithOwner {
    fn from(raw: ReminderWithOwnerRaw) -> Self {
        let owner = raw.owner_phone.map(|phone| User {
            id: raw.user_uid.into(),
            name: raw.owner_name.unwrap_or_default(),
            phone,
            country_code: raw.owner_country_code.unwrap_or_default(),
            email: raw.owner_email,
            whatsapp_number: raw.owner_whatsapp_number,
            preferences: NotificationPreferences {
                email: raw.owner_email_enabled.unwrap_or(true),
                whatsapp: raw.owner_whatsapp_enabled.unwrap_or(true),
            },
        });
        let reminder = ReminderRaw {
            reminder_uid: raw.reminder_uid,
            user_uid: raw.user_uid,
            title: raw.title,
            event_date: raw.event_date,
            reminder_type: raw.reminder_type,
            remind_before_days: raw.remind_before_days,
            repeat_every_year: raw.repeat_every_year,
            notes: raw.notes,
            is_active: raw.is_active,
            last_notified_at: raw.last_notified_at,
        };

        Self {
            reminder: reminder.into(),
            owner,
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders
            (reminder_uid, user_uid, title, event_date, reminder_type,
             remind_before_days, repeat_every_year, notes, is_active, last_notified_at)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.user_id.inner_ref())
        .bind(&reminder.title)
        .bind(reminder.date)
        .bind(reminder.reminder_type.as_str())
        .bind(reminder.remind_before_days as i32)
        .bind(reminder.repeat_every_year)
        .bind(&reminder.notes)
        .bind(reminder.is_active)
        .bind(reminder.last_notified_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminders
            SET title = $2,
            event_date = $3,
            reminder_type = $4,
            remind_before_days = $5,
            repeat_every_year = $6,
            notes = $7,
            is_active = $8,
            last_notified_at = $9
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(&reminder.title)
        .bind(reminder.date)
        .bind(reminder.reminder_type.as_str())
        .bind(reminder.remind_before_days as i32)
        .bind(reminder.repeat_every_year)
        .bind(&reminder.notes)
        .bind(reminder.is_active)
        .bind(reminder.last_notified_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT r.reminder_uid, r.user_uid, r.title, r.event_date, r.reminder_type,
                   r.remind_before_days, r.repeat_every_year, r.notes, r.is_active,
                   r.last_notified_at
            FROM reminders AS r
            WHERE r.reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        .ok()
        .map(|reminder| reminder.into())
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Reminder> {
        sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT r.reminder_uid, r.user_uid, r.title, r.event_date, r.reminder_type,
                   r.remind_before_days, r.repeat_every_year, r.notes, r.is_active,
                   r.last_notified_at
            FROM reminders AS r
            WHERE r.user_uid = $1
            ORDER BY r.created ASC
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|reminder| reminder.into())
        .collect()
    }

    async fn find_active_with_owner(&self) -> anyhow::Result<Vec<ReminderWithOwner>> {
        let reminders = sqlx::query_as::<_, ReminderWithOwnerRaw>(
            r#"
            SELECT r.reminder_uid, r.user_uid, r.title, r.event_date, r.reminder_type,
                   r.remind_before_days, r.repeat_every_year, r.notes, r.is_active,
                   r.last_notified_at,
                   u.name AS owner_name,
                   u.phone AS owner_phone,
                   u.country_code AS owner_country_code,
                   u.email AS owner_email,
                   u.whatsapp_number AS owner_whatsapp_number,
                   u.email_enabled AS owner_email_enabled,
                   u.whatsapp_enabled AS owner_whatsapp_enabled
            FROM reminders AS r
            LEFT JOIN users AS u ON u.user_uid = r.user_uid
            WHERE r.is_active = true
            ORDER BY r.created ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn mark_notified(&self, reminder_ids: &[ID], at: DateTime<Utc>) -> anyhow::Result<u64> {
        let reminder_uids = reminder_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();

        let res = sqlx::query(
            r#"
            UPDATE reminders
            SET last_notified_at = $2
            WHERE reminder_uid = ANY($1)
            "#,
        )
        .bind(&reminder_uids)
        .bind(at)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected())
    }

    async fn delete(&self, reminder_id: &ID) -> Option<Reminder> {
        sqlx::query_as::<_, ReminderRaw>(
            r#"
            DELETE FROM reminders AS r
            WHERE r.reminder_uid = $1
            RETURNING r.reminder_uid, r.user_uid, r.title, r.event_date, r.reminder_type,
                      r.remind_before_days, r.repeat_every_year, r.notes, r.is_active,
                      r.last_notified_at
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        .ok()
        .map(|reminder| reminder.into())
    }
}
