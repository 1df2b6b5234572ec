use crate::shared::usecase::UseCase;
use chrono::{DateTime, Utc};
use lifereminder_domain::{
    date::{add_days, effective_event_date, end_of_day, notify_date, start_of_day},
    Reminder, Urgency, User,
};
use lifereminder_infra::LifeReminderContext;
use tracing::info;

/// Scans the active reminders and selects the ones to act on this run,
/// excluding anything already handled today.
#[derive(Debug)]
pub struct GetDueRemindersUseCase {
    pub now: DateTime<Utc>,
}

/// A reminder selected for notification in the current run, paired with its
/// owner and an urgency label. Engine-internal, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DueReminder {
    pub reminder: Reminder,
    pub user: User,
    pub urgency: Urgency,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetDueRemindersUseCase {
    type Response = Vec<DueReminder>;
    type Error = UseCaseError;

    const NAME: &'static str = "GetDueReminders";

    async fn execute(
        &mut self,
        ctx: &LifeReminderContext,
    ) -> Result<Self::Response, Self::Error> {
        let tz = ctx.config.cron.timezone;
        let today = self.now.with_timezone(&tz).date_naive();

        let today_start = start_of_day(today);
        let today_end = end_of_day(today);
        let tomorrow = add_days(today, 1);
        let tomorrow_start = start_of_day(tomorrow);
        let tomorrow_end = end_of_day(tomorrow);

        let reminders = ctx
            .repos
            .reminders
            .find_active_with_owner()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut due = Vec::new();

        for entry in reminders {
            let reminder = entry.reminder;
            // Owner could not be resolved, nothing sensible to deliver
            let user = match entry.owner {
                Some(user) => user,
                None => continue,
            };

            let event_date =
                effective_event_date(reminder.date, reminder.repeat_every_year, today);
            let event = start_of_day(event_date);
            let event_is_today = event >= today_start && event <= today_end;
            let event_is_tomorrow = event >= tomorrow_start && event <= tomorrow_end;

            let notify = start_of_day(notify_date(event_date, reminder.remind_before_days));
            let notify_is_today = notify >= today_start && notify <= today_end;

            // First match wins: an event today always beats its own notify
            // window, so it can never end up labelled "In 0 days"
            let urgency = if event_is_today {
                Urgency::Today
            } else if event_is_tomorrow {
                Urgency::Tomorrow
            } else if notify_is_today {
                let days_until = (event - today_start).num_days();
                Urgency::InDays(days_until)
            } else {
                continue;
            };

            // The job may fire more than once per day, never notify twice
            // on the same calendar day
            if let Some(last_notified_at) = reminder.last_notified_at {
                if last_notified_at.with_timezone(&tz).date_naive() == today {
                    info!("Skipping \"{}\", already notified today", reminder.title);
                    continue;
                }
            }

            due.push(DueReminder {
                reminder,
                user,
                urgency,
            });
        }

        info!("Found {} due reminder(s)", due.len());
        Ok(due)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::{setup_ctx, test_now, today, ymd};
    use super::*;
    use crate::shared::usecase::execute;
    use chrono::{Duration, NaiveDate};
    use lifereminder_domain::ID;

    async fn insert_user(ctx: &LifeReminderContext) -> User {
        let user = User::new("9876543210".into());
        ctx.repos.users.insert(&user).await.unwrap();
        user
    }

    async fn insert_reminder(
        ctx: &LifeReminderContext,
        user_id: &ID,
        date: NaiveDate,
        remind_before_days: u32,
    ) -> Reminder {
        let mut reminder = Reminder::new(user_id.clone(), "Test".into(), date);
        reminder.repeat_every_year = false;
        reminder.remind_before_days = remind_before_days;
        ctx.repos.reminders.insert(&reminder).await.unwrap();
        reminder
    }

    #[tokio::test]
    async fn selects_events_in_the_notification_window() {
        let ctx = setup_ctx();
        let user = insert_user(&ctx).await;

        let r_today = insert_reminder(&ctx, &user.id, today(), 0).await;
        let r_tomorrow = insert_reminder(&ctx, &user.id, add_days(today(), 1), 0).await;
        let r_lead = insert_reminder(&ctx, &user.id, add_days(today(), 5), 5).await;
        // Notify window opens in three days, not due yet
        insert_reminder(&ctx, &user.id, add_days(today(), 5), 2).await;

        let due = execute(GetDueRemindersUseCase { now: test_now() }, &ctx)
            .await
            .unwrap();

        assert_eq!(due.len(), 3);
        assert_eq!(due[0].reminder.id, r_today.id);
        assert_eq!(due[0].urgency, Urgency::Today);
        assert_eq!(due[1].reminder.id, r_tomorrow.id);
        assert_eq!(due[1].urgency, Urgency::Tomorrow);
        assert_eq!(due[2].reminder.id, r_lead.id);
        assert_eq!(due[2].urgency, Urgency::InDays(5));
    }

    #[tokio::test]
    async fn event_today_wins_over_its_own_notify_window() {
        let ctx = setup_ctx();
        let user = insert_user(&ctx).await;
        insert_reminder(&ctx, &user.id, today(), 0).await;

        let due = execute(GetDueRemindersUseCase { now: test_now() }, &ctx)
            .await
            .unwrap();

        assert_eq!(due.len(), 1);
        assert_eq!(due[0].urgency, Urgency::Today);
    }

    #[tokio::test]
    async fn recurring_events_are_projected_onto_the_current_year() {
        let ctx = setup_ctx();
        let user = insert_user(&ctx).await;

        // Stored a year back, recurs yearly on the day after "today"
        let mut reminder =
            Reminder::new(user.id.clone(), "Anniversary".into(), ymd(2025, 6, 15));
        reminder.remind_before_days = 1;
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let due = execute(GetDueRemindersUseCase { now: test_now() }, &ctx)
            .await
            .unwrap();

        assert_eq!(due.len(), 1);
        assert_eq!(due[0].urgency, Urgency::Tomorrow);
    }

    #[tokio::test]
    async fn already_notified_today_is_skipped_for_any_label() {
        let ctx = setup_ctx();
        let user = insert_user(&ctx).await;

        let mut r_today = insert_reminder(&ctx, &user.id, today(), 0).await;
        let mut r_lead = insert_reminder(&ctx, &user.id, add_days(today(), 5), 5).await;

        // Notified earlier today, any time-of-day counts
        r_today.last_notified_at = Some(test_now() - Duration::hours(6));
        r_lead.last_notified_at = Some(test_now() - Duration::hours(2));
        ctx.repos.reminders.save(&r_today).await.unwrap();
        ctx.repos.reminders.save(&r_lead).await.unwrap();

        let due = execute(GetDueRemindersUseCase { now: test_now() }, &ctx)
            .await
            .unwrap();
        assert!(due.is_empty());

        // Notified yesterday, due again
        r_today.last_notified_at = Some(test_now() - Duration::days(1));
        ctx.repos.reminders.save(&r_today).await.unwrap();

        let due = execute(GetDueRemindersUseCase { now: test_now() }, &ctx)
            .await
            .unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].reminder.id, r_today.id);
    }

    #[tokio::test]
    async fn selection_is_idempotent_without_store_mutation() {
        let ctx = setup_ctx();
        let user = insert_user(&ctx).await;
        insert_reminder(&ctx, &user.id, today(), 0).await;
        insert_reminder(&ctx, &user.id, add_days(today(), 1), 1).await;

        let first = execute(GetDueRemindersUseCase { now: test_now() }, &ctx)
            .await
            .unwrap();
        let second = execute(GetDueRemindersUseCase { now: test_now() }, &ctx)
            .await
            .unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn orphaned_and_inactive_reminders_are_skipped() {
        let ctx = setup_ctx();
        let user = insert_user(&ctx).await;

        // Owner reference that resolves to nothing
        insert_reminder(&ctx, &ID::new(), today(), 0).await;

        let mut inactive = insert_reminder(&ctx, &user.id, today(), 0).await;
        inactive.is_active = false;
        ctx.repos.reminders.save(&inactive).await.unwrap();

        let due = execute(GetDueRemindersUseCase { now: test_now() }, &ctx)
            .await
            .unwrap();
        assert!(due.is_empty());
    }
}
