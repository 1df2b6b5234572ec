use super::{IReminderRepo, ReminderWithOwner};
use crate::repos::shared::inmemory_repo::*;
use chrono::{DateTime, Utc};
use lifereminder_domain::{Entity, Reminder, User, ID};
use std::sync::{Arc, Mutex};

pub struct InMemoryReminderRepo {
    reminders: Mutex<Vec<Reminder>>,
    /// Shared with `InMemoryUserRepo` so owners can be resolved
    users: Arc<Mutex<Vec<User>>>,
}

impl InMemoryReminderRepo {
    pub fn new(users: Arc<Mutex<Vec<User>>>) -> Self {
        Self {
            reminders: Mutex::new(Vec::new()),
            users,
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        save(reminder, &self.reminders);
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        find(reminder_id, &self.reminders)
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Reminder> {
        find_by(&self.reminders, |r| &r.user_id == user_id)
    }

    async fn find_active_with_owner(&self) -> anyhow::Result<Vec<ReminderWithOwner>> {
        let users = self.users.lock().unwrap();
        let reminders = find_by(&self.reminders, |r| r.is_active);

        Ok(reminders
            .into_iter()
            .map(|reminder| {
                let owner = users.iter().find(|u| u.id == reminder.user_id).cloned();
                ReminderWithOwner { reminder, owner }
            })
            .collect())
    }

    async fn mark_notified(&self, reminder_ids: &[ID], at: DateTime<Utc>) -> anyhow::Result<u64> {
        let updated = update_many(
            &self.reminders,
            |r| reminder_ids.contains(&r.id()),
            |r| r.last_notified_at = Some(at),
        );
        Ok(updated)
    }

    async fn delete(&self, reminder_id: &ID) -> Option<Reminder> {
        delete(reminder_id, &self.reminders)
    }
}
