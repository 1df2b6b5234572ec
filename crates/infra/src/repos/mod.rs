mod notification_log;
mod reminder;
mod shared;
mod user;

use lifereminder_domain::User;
pub use notification_log::{INotificationLogRepo, InMemoryNotificationLogRepo};
pub use reminder::{IReminderRepo, InMemoryReminderRepo, ReminderWithOwner};
use sqlx::postgres::PgPoolOptions;
use std::sync::{Arc, Mutex};
pub use user::{IUserRepo, InMemoryUserRepo};

use notification_log::PostgresNotificationLogRepo;
use reminder::PostgresReminderRepo;
use user::PostgresUserRepo;

#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<dyn IReminderRepo>,
    pub users: Arc<dyn IUserRepo>,
    pub notification_logs: Arc<dyn INotificationLogRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;

        Ok(Self {
            reminders: Arc::new(PostgresReminderRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            notification_logs: Arc::new(PostgresNotificationLogRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        // The reminder repo resolves owners against the same user collection
        // the user repo writes to
        let users = Arc::new(Mutex::new(Vec::<User>::new()));

        Self {
            reminders: Arc::new(InMemoryReminderRepo::new(users.clone())),
            users: Arc::new(InMemoryUserRepo::new(users)),
            notification_logs: Arc::new(InMemoryNotificationLogRepo::new()),
        }
    }
}
