use super::get_due_reminders::{DueReminder, GetDueRemindersUseCase};
use super::templates::{self, TemplateItem};
use crate::shared::usecase::{execute, UseCase};
use chrono::{DateTime, Utc};
use lifereminder_domain::{
    Channel, NotificationLogEntry, Reminder, Urgency, User, ID,
};
use lifereminder_infra::{Delivery, LifeReminderContext};
use std::collections::HashMap;
use tracing::{debug, error, info};

/// Drives one full notification run: select due reminders, group them per
/// user, deliver one message per enabled channel, record every outcome and
/// commit the batched "notified" stamp.
#[derive(Debug)]
pub struct ProcessRemindersUseCase {
    pub now: DateTime<Utc>,
}

#[derive(Debug, Default, PartialEq)]
pub struct RunSummary {
    pub due_reminders: usize,
    pub users: usize,
    pub reminders_marked: u64,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

/// Due reminders for one user, in first-seen order
#[derive(Debug, Clone, PartialEq)]
pub struct UserBatch {
    pub user: User,
    pub items: Vec<(Reminder, Urgency)>,
}

/// Partitions due reminders by owner. Both the user buckets and the items
/// within each bucket keep their first-seen order, it is user-visible in the
/// rendered messages.
pub fn group_by_user(due: Vec<DueReminder>) -> Vec<UserBatch> {
    let mut batches: Vec<UserBatch> = Vec::new();
    let mut index_by_user: HashMap<ID, usize> = HashMap::new();

    for item in due {
        match index_by_user.get(&item.user.id) {
            Some(&i) => batches[i].items.push((item.reminder, item.urgency)),
            None => {
                index_by_user.insert(item.user.id.clone(), batches.len());
                batches.push(UserBatch {
                    user: item.user,
                    items: vec![(item.reminder, item.urgency)],
                });
            }
        }
    }

    batches
}

fn template_items(batch: &UserBatch) -> Vec<TemplateItem> {
    batch
        .items
        .iter()
        .map(|(reminder, urgency)| TemplateItem {
            title: reminder.title.clone(),
            reminder_type: reminder.reminder_type,
            urgency: *urgency,
            notes: reminder.notes.clone().unwrap_or_default(),
        })
        .collect()
}

fn batch_reminder_ids(batch: &UserBatch) -> Vec<ID> {
    batch.items.iter().map(|(r, _)| r.id.clone()).collect()
}

async fn append_log(
    ctx: &LifeReminderContext,
    user: &User,
    channel: Channel,
    reminder_ids: Vec<ID>,
    delivery: &Delivery,
    sent_at: DateTime<Utc>,
) {
    let entry = NotificationLogEntry::new(
        user.id.clone(),
        channel,
        reminder_ids,
        delivery.status,
        delivery.detail.clone(),
        sent_at,
    );

    // The audit log must never block dispatch
    if let Err(e) = ctx.repos.notification_logs.insert(&entry).await {
        error!(
            "Failed to log {} notification for user {}: {:?}",
            channel, user.id, e
        );
    }
}

impl ProcessRemindersUseCase {
    async fn dispatch_email(&self, batch: &UserBatch, ctx: &LifeReminderContext) {
        let user = &batch.user;

        if !ctx.config.notifications.email_enabled {
            debug!("Email notifications disabled globally, skipping {}", user.phone);
            return;
        }
        if !user.preferences.email {
            debug!("User {} opted out of email notifications", user.phone);
            return;
        }

        let payload = templates::build_reminder_email(&user.name, &template_items(batch));
        let delivery = ctx.channels.email.send(user.email.as_deref(), &payload).await;

        append_log(
            ctx,
            user,
            Channel::Email,
            batch_reminder_ids(batch),
            &delivery,
            self.now,
        )
        .await;
    }

    async fn dispatch_whatsapp(&self, batch: &UserBatch, ctx: &LifeReminderContext) {
        let user = &batch.user;

        if !ctx.config.notifications.whatsapp_enabled {
            debug!(
                "WhatsApp notifications disabled globally, skipping {}",
                user.phone
            );
            return;
        }
        if !user.preferences.whatsapp {
            debug!("User {} opted out of WhatsApp notifications", user.phone);
            return;
        }

        let message = templates::build_reminder_whatsapp(&user.name, &template_items(batch));
        let delivery = ctx
            .channels
            .whatsapp
            .send(&user.whatsapp_recipient(), &message)
            .await;

        append_log(
            ctx,
            user,
            Channel::Whatsapp,
            batch_reminder_ids(batch),
            &delivery,
            self.now,
        )
        .await;
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ProcessRemindersUseCase {
    type Response = RunSummary;
    type Error = UseCaseError;

    const NAME: &'static str = "ProcessReminders";

    async fn execute(
        &mut self,
        ctx: &LifeReminderContext,
    ) -> Result<Self::Response, Self::Error> {
        let due = execute(GetDueRemindersUseCase { now: self.now }, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        if due.is_empty() {
            info!("No reminders due, exiting");
            return Ok(RunSummary::default());
        }

        let due_reminders = due.len();
        let batches = group_by_user(due);
        info!("Grouped into {} user(s)", batches.len());

        let mut notified_ids: Vec<ID> = Vec::new();

        for batch in &batches {
            info!(
                "Processing {} reminder(s) for user {}",
                batch.items.len(),
                batch.user.phone
            );

            self.dispatch_email(batch, ctx).await;
            self.dispatch_whatsapp(batch, ctx).await;

            // The batch counts as notified no matter how the individual
            // channels fared, delivery was attempted this cycle
            notified_ids.extend(batch_reminder_ids(batch));
        }

        let reminders_marked = match ctx
            .repos
            .reminders
            .mark_notified(&notified_ids, self.now)
            .await
        {
            Ok(count) => count,
            Err(e) => {
                error!(
                    "Failed to mark {} reminder(s) as notified: {:?}",
                    notified_ids.len(),
                    e
                );
                return Err(UseCaseError::StorageError);
            }
        };

        info!("Run complete, {} reminder(s) handled", reminders_marked);

        Ok(RunSummary {
            due_reminders,
            users: batches.len(),
            reminders_marked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::*;
    use super::*;
    use lifereminder_domain::DeliveryStatus;

    fn due_item(reminder: &Reminder, user: &User, urgency: Urgency) -> DueReminder {
        DueReminder {
            reminder: reminder.clone(),
            user: user.clone(),
            urgency,
        }
    }

    #[test]
    fn grouping_preserves_first_seen_order() {
        let user_a = User::new("111".into());
        let user_b = User::new("222".into());
        let r1 = Reminder::new(user_a.id.clone(), "R1".into(), today());
        let r2 = Reminder::new(user_b.id.clone(), "R2".into(), today());
        let r3 = Reminder::new(user_a.id.clone(), "R3".into(), today());

        let batches = group_by_user(vec![
            due_item(&r1, &user_a, Urgency::Today),
            due_item(&r2, &user_b, Urgency::Today),
            due_item(&r3, &user_a, Urgency::Tomorrow),
        ]);

        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].user.id, user_a.id);
        assert_eq!(batches[0].items[0].0.id, r1.id);
        assert_eq!(batches[0].items[1].0.id, r3.id);
        assert_eq!(batches[1].user.id, user_b.id);
        assert_eq!(batches[1].items[0].0.id, r2.id);
    }

    #[test]
    fn grouping_an_empty_run_yields_nothing() {
        assert!(group_by_user(Vec::new()).is_empty());
    }

    #[tokio::test]
    async fn notifies_by_email_and_respects_whatsapp_opt_out() {
        let email = StubEmailSender::with_outcome(Delivery::sent("message-id"));
        let whatsapp = StubWhatsappSender::with_outcome(Delivery::sent("ok"));
        let ctx = setup_ctx_with(email.clone(), whatsapp.clone());

        let mut user = User::new("9876543210".into());
        user.email = Some("asha@example.com".into());
        user.preferences.whatsapp = false;
        ctx.repos.users.insert(&user).await.unwrap();

        // Stored last year, recurs yearly on the day after the fixed "now"
        let mut reminder =
            Reminder::new(user.id.clone(), "Dad's birthday".into(), ymd(2025, 6, 15));
        reminder.remind_before_days = 1;
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let summary = execute(ProcessRemindersUseCase { now: test_now() }, &ctx)
            .await
            .unwrap();

        assert_eq!(
            summary,
            RunSummary {
                due_reminders: 1,
                users: 1,
                reminders_marked: 1,
            }
        );

        // One email went out, to the right address
        assert_eq!(email.sent_count(), 1);
        let (to, payload) = email.sent.lock().unwrap()[0].clone();
        assert_eq!(to.as_deref(), Some("asha@example.com"));
        assert!(payload.subject.contains("Dad's birthday"));
        assert!(payload.subject.contains("Tomorrow"));

        // Opted out of WhatsApp: no send and no log entry either
        assert_eq!(whatsapp.sent_count(), 0);
        let logs = ctx.repos.notification_logs.find_by_user(&user.id).await;
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].channel, Channel::Email);
        assert_eq!(logs[0].status, DeliveryStatus::Sent);
        assert_eq!(logs[0].reminder_ids, vec![reminder.id.clone()]);

        // The dedup stamp landed
        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert_eq!(stored.last_notified_at, Some(test_now()));

        // Re-running later the same day selects nothing new
        let summary = execute(ProcessRemindersUseCase { now: test_now() }, &ctx)
            .await
            .unwrap();
        assert_eq!(summary, RunSummary::default());
        assert_eq!(email.sent_count(), 1);
    }

    #[tokio::test]
    async fn globally_disabled_channels_leave_no_trace() {
        let email = StubEmailSender::with_outcome(Delivery::sent("ok"));
        let whatsapp = StubWhatsappSender::with_outcome(Delivery::sent("ok"));
        let mut ctx = setup_ctx_with(email.clone(), whatsapp.clone());
        ctx.config.notifications.email_enabled = false;
        ctx.config.notifications.whatsapp_enabled = false;

        let user = User::new("9876543210".into());
        ctx.repos.users.insert(&user).await.unwrap();
        let reminder = Reminder::new(user.id.clone(), "Rent".into(), today());
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let summary = execute(ProcessRemindersUseCase { now: test_now() }, &ctx)
            .await
            .unwrap();

        // Still marked: the engine handled the batch this cycle
        assert_eq!(summary.reminders_marked, 1);
        assert_eq!(email.sent_count(), 0);
        assert_eq!(whatsapp.sent_count(), 0);
        assert!(ctx
            .repos
            .notification_logs
            .find_by_user(&user.id)
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn transport_skips_and_failures_are_logged_but_do_not_abort() {
        let email = StubEmailSender::with_outcome(Delivery::skipped("SMTP not configured"));
        let whatsapp = StubWhatsappSender::with_outcome(Delivery::failed("HTTP 500"));
        let ctx = setup_ctx_with(email.clone(), whatsapp.clone());

        let mut user_a = User::new("111".into());
        user_a.email = Some("a@example.com".into());
        let mut user_b = User::new("222".into());
        user_b.email = Some("b@example.com".into());
        ctx.repos.users.insert(&user_a).await.unwrap();
        ctx.repos.users.insert(&user_b).await.unwrap();

        let reminder_a = Reminder::new(user_a.id.clone(), "Bill".into(), today());
        let reminder_b = Reminder::new(user_b.id.clone(), "Rent".into(), today());
        ctx.repos.reminders.insert(&reminder_a).await.unwrap();
        ctx.repos.reminders.insert(&reminder_b).await.unwrap();

        let summary = execute(ProcessRemindersUseCase { now: test_now() }, &ctx)
            .await
            .unwrap();

        // Neither the skip nor the failure stopped the run
        assert_eq!(summary.users, 2);
        assert_eq!(summary.reminders_marked, 2);

        let logs_a = ctx.repos.notification_logs.find_by_user(&user_a.id).await;
        assert_eq!(logs_a.len(), 2);
        let email_log = logs_a
            .iter()
            .find(|l| l.channel == Channel::Email)
            .unwrap();
        assert_eq!(email_log.status, DeliveryStatus::Skipped);
        assert_eq!(email_log.message, "SMTP not configured");
        let whatsapp_log = logs_a
            .iter()
            .find(|l| l.channel == Channel::Whatsapp)
            .unwrap();
        assert_eq!(whatsapp_log.status, DeliveryStatus::Failed);

        // Failed delivery still counts as attempted
        let stored = ctx.repos.reminders.find(&reminder_b.id).await.unwrap();
        assert_eq!(stored.last_notified_at, Some(test_now()));
    }

    #[tokio::test]
    async fn one_message_covers_all_of_a_users_due_reminders() {
        let email = StubEmailSender::with_outcome(Delivery::sent("ok"));
        let whatsapp = StubWhatsappSender::with_outcome(Delivery::sent("ok"));
        let ctx = setup_ctx_with(email.clone(), whatsapp.clone());

        let mut user = User::new("9876543210".into());
        user.email = Some("asha@example.com".into());
        ctx.repos.users.insert(&user).await.unwrap();

        let r1 = Reminder::new(user.id.clone(), "Rent".into(), today());
        let mut r2 = Reminder::new(user.id.clone(), "Insurance".into(), add_days_helper(1));
        r2.remind_before_days = 1;
        ctx.repos.reminders.insert(&r1).await.unwrap();
        ctx.repos.reminders.insert(&r2).await.unwrap();

        let summary = execute(ProcessRemindersUseCase { now: test_now() }, &ctx)
            .await
            .unwrap();

        assert_eq!(summary.due_reminders, 2);
        assert_eq!(summary.users, 1);
        // One combined email and one combined WhatsApp message
        assert_eq!(email.sent_count(), 1);
        assert_eq!(whatsapp.sent_count(), 1);

        let logs = ctx.repos.notification_logs.find_by_user(&user.id).await;
        assert_eq!(logs.len(), 2);
        for log in logs {
            assert_eq!(log.reminder_ids.len(), 2);
        }
    }

    fn add_days_helper(days: i64) -> chrono::NaiveDate {
        lifereminder_domain::date::add_days(today(), days)
    }
}
