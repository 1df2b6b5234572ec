use super::dtos::ReminderResponse;
use crate::error::LifeReminderError;
use crate::shared::guard::Guard;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use lifereminder_domain::{Reminder, ID};
use lifereminder_infra::LifeReminderContext;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PathParams {
    pub reminder_id: String,
}

pub type APIResponse = ReminderResponse;

pub async fn delete_reminder_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<LifeReminderContext>,
) -> Result<HttpResponse, LifeReminderError> {
    let reminder_id = Guard::against_malformed_id(path.reminder_id.clone())?;

    let usecase = DeleteReminderUseCase { reminder_id };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.reminder)))
        .map_err(LifeReminderError::from)
}

/// Soft delete: flips `is_active` so the reminder drops out of due-selection
/// but stays around for the audit trail.
#[derive(Debug)]
pub struct DeleteReminderUseCase {
    pub reminder_id: ID,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub reminder: Reminder,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    ReminderNotFound,
}

impl From<UseCaseError> for LifeReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::ReminderNotFound => {
                Self::NotFound("The requested reminder was not found.".into())
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteReminderUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "DeleteReminder";

    async fn execute(
        &mut self,
        ctx: &LifeReminderContext,
    ) -> Result<Self::Response, Self::Error> {
        let mut reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Some(reminder) => reminder,
            None => return Err(UseCaseError::ReminderNotFound),
        };

        reminder.is_active = false;

        match ctx.repos.reminders.save(&reminder).await {
            Ok(_) => Ok(UseCaseRes { reminder }),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::test_helpers::{setup_ctx, ymd};
    use lifereminder_domain::User;

    #[tokio::test]
    async fn soft_deletes_instead_of_removing() {
        let ctx = setup_ctx();
        let user = User::new("9876543210".into());
        ctx.repos.users.insert(&user).await.unwrap();
        let reminder = Reminder::new(user.id.clone(), "Rent".into(), ymd(2026, 7, 1));
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let usecase = DeleteReminderUseCase {
            reminder_id: reminder.id.clone(),
        };
        let res = execute(usecase, &ctx).await.unwrap();
        assert!(!res.reminder.is_active);

        // Still stored, just inactive
        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert!(!stored.is_active);
    }
}
