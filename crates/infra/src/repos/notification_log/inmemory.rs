use super::INotificationLogRepo;
use crate::repos::shared::inmemory_repo::*;
use lifereminder_domain::{NotificationLogEntry, ID};
use std::sync::Mutex;

pub struct InMemoryNotificationLogRepo {
    entries: Mutex<Vec<NotificationLogEntry>>,
}

impl InMemoryNotificationLogRepo {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryNotificationLogRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl INotificationLogRepo for InMemoryNotificationLogRepo {
    async fn insert(&self, entry: &NotificationLogEntry) -> anyhow::Result<()> {
        insert(entry, &self.entries);
        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<NotificationLogEntry> {
        let mut entries = find_by(&self.entries, |e| &e.user_id == user_id);
        entries.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
        entries
    }
}
