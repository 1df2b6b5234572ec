use chrono::{DateTime, NaiveDate, Utc};
use lifereminder_domain::{Reminder, ReminderType, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub reminder_type: ReminderType,
    pub remind_before_days: u32,
    pub repeat_every_year: bool,
    pub notes: Option<String>,
    pub is_active: bool,
    pub last_notified_at: Option<DateTime<Utc>>,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            user_id: reminder.user_id,
            title: reminder.title,
            date: reminder.date,
            reminder_type: reminder.reminder_type,
            remind_before_days: reminder.remind_before_days,
            repeat_every_year: reminder.repeat_every_year,
            notes: reminder.notes,
            is_active: reminder.is_active,
            last_notified_at: reminder.last_notified_at,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminder: ReminderDTO,
}

impl ReminderResponse {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            reminder: ReminderDTO::new(reminder),
        }
    }
}
