use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use lifereminder_infra::{
    Channels, Config, CronConfig, Delivery, EmailPayload, IEmailSender, ISys, IWhatsappSender,
    LifeReminderContext, NotificationConfig, Repos, SmtpConfig, WhatsappConfig,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// The fixed "now" every engine test runs at: 2026-06-14 08:00 UTC
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 14, 8, 0, 0).unwrap()
}

pub fn today() -> NaiveDate {
    test_now().date_naive()
}

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("Valid date")
}

pub struct StaticTimeSys {}
impl ISys for StaticTimeSys {
    fn now(&self) -> DateTime<Utc> {
        test_now()
    }
}

/// Records every send and resolves to a fixed outcome
pub struct StubEmailSender {
    outcome: Delivery,
    pub sent: Mutex<Vec<(Option<String>, EmailPayload)>>,
}

impl StubEmailSender {
    pub fn with_outcome(outcome: Delivery) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl IEmailSender for StubEmailSender {
    async fn send(&self, to: Option<&str>, email: &EmailPayload) -> Delivery {
        self.sent
            .lock()
            .unwrap()
            .push((to.map(str::to_string), email.clone()));
        self.outcome.clone()
    }
}

pub struct StubWhatsappSender {
    outcome: Delivery,
    pub sent: Mutex<Vec<(String, String)>>,
}

impl StubWhatsappSender {
    pub fn with_outcome(outcome: Delivery) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl IWhatsappSender for StubWhatsappSender {
    async fn send(&self, to: &str, message: &str) -> Delivery {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), message.to_string()));
        self.outcome.clone()
    }
}

pub fn test_config() -> Config {
    Config {
        port: 5000,
        smtp: SmtpConfig {
            host: String::new(),
            port: 587,
            username: String::new(),
            password: String::new(),
            from: "Life Reminder <noreply@lifereminder.app>".into(),
        },
        whatsapp: WhatsappConfig {
            api_url: String::new(),
            api_key: String::new(),
        },
        notifications: NotificationConfig {
            email_enabled: true,
            whatsapp_enabled: true,
            send_timeout: Duration::from_secs(5),
        },
        cron: CronConfig {
            schedule: "0 0 7 * * *".into(),
            timezone: chrono_tz::UTC,
            stale_run_timeout: Duration::from_secs(60),
        },
    }
}

pub fn setup_ctx_with(
    email: Arc<StubEmailSender>,
    whatsapp: Arc<StubWhatsappSender>,
) -> LifeReminderContext {
    LifeReminderContext {
        repos: Repos::create_inmemory(),
        config: test_config(),
        sys: Arc::new(StaticTimeSys {}),
        channels: Channels { email, whatsapp },
    }
}

pub fn setup_ctx() -> LifeReminderContext {
    setup_ctx_with(
        StubEmailSender::with_outcome(Delivery::sent("stub")),
        StubWhatsappSender::with_outcome(Delivery::sent("stub")),
    )
}
