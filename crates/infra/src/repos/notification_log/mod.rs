mod inmemory;
mod postgres;

pub use inmemory::InMemoryNotificationLogRepo;
use lifereminder_domain::{NotificationLogEntry, ID};
pub use postgres::PostgresNotificationLogRepo;

#[async_trait::async_trait]
pub trait INotificationLogRepo: Send + Sync {
    /// Append one delivery-attempt record. The log is append-only, there is
    /// no update or delete.
    async fn insert(&self, entry: &NotificationLogEntry) -> anyhow::Result<()>;
    /// Entries for one user, most recent first
    async fn find_by_user(&self, user_id: &ID) -> Vec<NotificationLogEntry>;
}
