mod inmemory;
mod postgres;

use chrono::{DateTime, Utc};
pub use inmemory::InMemoryReminderRepo;
use lifereminder_domain::{Reminder, User, ID};
pub use postgres::PostgresReminderRepo;

/// A `Reminder` paired with its resolved owner. The owner can be missing
/// when the referenced user no longer exists, callers must treat such
/// reminders as orphans and skip them.
#[derive(Debug, Clone)]
pub struct ReminderWithOwner {
    pub reminder: Reminder,
    pub owner: Option<User>,
}

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> Option<Reminder>;
    async fn find_by_user(&self, user_id: &ID) -> Vec<Reminder>;
    /// Every active reminder with its owner pre-resolved, in creation order
    async fn find_active_with_owner(&self) -> anyhow::Result<Vec<ReminderWithOwner>>;
    /// Single set-based write stamping `last_notified_at` on the whole
    /// batch. Returns how many reminders were updated.
    async fn mark_notified(&self, reminder_ids: &[ID], at: DateTime<Utc>) -> anyhow::Result<u64>;
    async fn delete(&self, reminder_id: &ID) -> Option<Reminder>;
}
