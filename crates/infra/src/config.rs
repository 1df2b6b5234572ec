use chrono_tz::Tz;
use std::time::Duration;
use tracing::warn;

/// Application configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    pub smtp: SmtpConfig,
    pub whatsapp: WhatsappConfig,
    pub notifications: NotificationConfig,
    pub cron: CronConfig,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// From-header on outgoing reminder mails
    pub from: String,
}

impl SmtpConfig {
    /// Whether the email transport can actually deliver. When this is false
    /// email dispatches are recorded as skipped instead of attempted.
    pub fn is_configured(&self) -> bool {
        !self.host.is_empty() && !self.username.is_empty() && !self.password.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct WhatsappConfig {
    /// WhatsApp Cloud API messages endpoint
    pub api_url: String,
    pub api_key: String,
}

impl WhatsappConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_url.is_empty() && !self.api_key.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct NotificationConfig {
    /// Global channel switches. A disabled channel is skipped silently,
    /// without audit log entries.
    pub email_enabled: bool,
    pub whatsapp_enabled: bool,
    /// Upper bound on a single channel-send call
    pub send_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct CronConfig {
    /// Cadence expression for the reminder job, seconds field included
    pub schedule: String,
    pub timezone: Tz,
    /// How long a run may hold the single-flight guard before a newer
    /// trigger is allowed to take over
    pub stale_run_timeout: Duration,
}

const DEFAULT_PORT: &str = "5000";
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_SMTP_FROM: &str = "Life Reminder <noreply@lifereminder.app>";
// 07:00 every day
const DEFAULT_CRON_SCHEDULE: &str = "0 0 7 * * *";
const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";
const DEFAULT_SEND_TIMEOUT_SECS: u64 = 30;
const DEFAULT_STALE_RUN_TIMEOUT_SECS: u64 = 60 * 30;

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

fn env_flag_enabled(key: &str) -> bool {
    std::env::var(key).map(|v| v != "false").unwrap_or(true)
}

impl Config {
    pub fn new() -> Self {
        let port = env_or("PORT", DEFAULT_PORT);
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, DEFAULT_PORT
                );
                DEFAULT_PORT.parse::<usize>().unwrap()
            }
        };

        let smtp_port = env_or("SMTP_PORT", &DEFAULT_SMTP_PORT.to_string());
        let smtp_port = match smtp_port.parse::<u16>() {
            Ok(smtp_port) => smtp_port,
            Err(_) => {
                warn!(
                    "The given SMTP_PORT: {} is not valid, falling back to the default: {}.",
                    smtp_port, DEFAULT_SMTP_PORT
                );
                DEFAULT_SMTP_PORT
            }
        };

        let timezone = env_or("CRON_TIMEZONE", DEFAULT_TIMEZONE);
        let timezone = match timezone.parse::<Tz>() {
            Ok(timezone) => timezone,
            Err(_) => {
                warn!(
                    "The given CRON_TIMEZONE: {} is not valid, falling back to the default: {}.",
                    timezone, DEFAULT_TIMEZONE
                );
                DEFAULT_TIMEZONE.parse::<Tz>().unwrap()
            }
        };

        let send_timeout_secs = env_or(
            "NOTIFICATION_SEND_TIMEOUT_SECS",
            &DEFAULT_SEND_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .unwrap_or(DEFAULT_SEND_TIMEOUT_SECS);

        let stale_run_timeout_secs = env_or(
            "CRON_STALE_RUN_TIMEOUT_SECS",
            &DEFAULT_STALE_RUN_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .unwrap_or(DEFAULT_STALE_RUN_TIMEOUT_SECS);

        Self {
            port,
            smtp: SmtpConfig {
                host: env_or("SMTP_HOST", ""),
                port: smtp_port,
                username: env_or("SMTP_USER", ""),
                password: env_or("SMTP_PASS", ""),
                from: env_or("SMTP_FROM", DEFAULT_SMTP_FROM),
            },
            whatsapp: WhatsappConfig {
                api_url: env_or("WHATSAPP_API_URL", ""),
                api_key: env_or("WHATSAPP_API_KEY", ""),
            },
            notifications: NotificationConfig {
                email_enabled: env_flag_enabled("NOTIFICATION_EMAIL_ENABLED"),
                whatsapp_enabled: env_flag_enabled("NOTIFICATION_WHATSAPP_ENABLED"),
                send_timeout: Duration::from_secs(send_timeout_secs),
            },
            cron: CronConfig {
                schedule: env_or("CRON_REMINDER_SCHEDULE", DEFAULT_CRON_SCHEDULE),
                timezone,
                stale_run_timeout: Duration::from_secs(stale_run_timeout_secs),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
