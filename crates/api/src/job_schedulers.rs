use crate::notification::ProcessRemindersUseCase;
use crate::shared::usecase::execute;
use chrono::{DateTime, Utc};
use cron::Schedule;
use lifereminder_infra::LifeReminderContext;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Single-flight guard around notification runs. The scheduler can fire
/// while a previous run is still in flight, only one run may own the flag at
/// a time. A run holding the flag longer than the staleness timeout is
/// assumed dead and gets taken over.
pub struct RunGuard {
    running: AtomicBool,
    started_at_millis: AtomicI64,
    stale_after: Duration,
}

impl RunGuard {
    pub fn new(stale_after: Duration) -> Self {
        Self {
            running: AtomicBool::new(false),
            started_at_millis: AtomicI64::new(0),
            stale_after,
        }
    }

    pub fn try_start(&self, now: DateTime<Utc>) -> bool {
        let now_millis = now.timestamp_millis();

        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            self.started_at_millis.store(now_millis, Ordering::SeqCst);
            return true;
        }

        let started_at = self.started_at_millis.load(Ordering::SeqCst);
        if now_millis - started_at >= self.stale_after.as_millis() as i64 {
            // The run that held the flag never finished, take over
            self.started_at_millis.store(now_millis, Ordering::SeqCst);
            return true;
        }

        false
    }

    pub fn finish(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

pub fn start_reminder_notification_job(ctx: LifeReminderContext) {
    let schedule = match Schedule::from_str(&ctx.config.cron.schedule) {
        Ok(schedule) => schedule,
        Err(e) => {
            error!(
                "Invalid cron expression \"{}\": {:?}",
                ctx.config.cron.schedule, e
            );
            return;
        }
    };

    info!(
        "Daily reminder job scheduled: \"{}\" ({})",
        ctx.config.cron.schedule, ctx.config.cron.timezone
    );

    let guard = Arc::new(RunGuard::new(ctx.config.cron.stale_run_timeout));

    actix_web::rt::spawn(async move {
        loop {
            let now = ctx.sys.now().with_timezone(&ctx.config.cron.timezone);
            let next = match schedule.after(&now).next() {
                Some(next) => next,
                None => break,
            };
            let wait = (next - now).to_std().unwrap_or_default();
            actix_web::rt::time::sleep(wait).await;

            let context = ctx.clone();
            let guard = guard.clone();
            actix_web::rt::spawn(async move {
                let now = context.sys.now();
                if !guard.try_start(now) {
                    warn!("Previous notification run still in flight, skipping this trigger");
                    return;
                }

                info!("Cron triggered at {}", now);
                let _ = execute(ProcessRemindersUseCase { now }, &context).await;
                guard.finish();
            });
        }
    });
}
