mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, CronConfig, NotificationConfig, SmtpConfig, WhatsappConfig};
pub use repos::{
    INotificationLogRepo, IReminderRepo, IUserRepo, ReminderWithOwner, Repos,
};
pub use services::{Channels, Delivery, EmailPayload, IEmailSender, IWhatsappSender};
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

#[derive(Clone)]
pub struct LifeReminderContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    /// Channel senders, constructed once at process start
    pub channels: Channels,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl LifeReminderContext {
    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        let channels = Channels::create(&config);
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            channels,
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> LifeReminderContext {
    LifeReminderContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string())
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
