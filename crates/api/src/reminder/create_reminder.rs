use super::dtos::ReminderResponse;
use crate::error::LifeReminderError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use lifereminder_domain::{Reminder, ReminderType, ID, MAX_REMIND_BEFORE_DAYS};
use lifereminder_infra::LifeReminderContext;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    pub user_id: ID,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, rename = "type")]
    pub reminder_type: Option<ReminderType>,
    #[serde(default)]
    pub remind_before_days: Option<u32>,
    #[serde(default)]
    pub repeat_every_year: Option<bool>,
    #[serde(default)]
    pub notes: Option<String>,
}

pub type APIResponse = ReminderResponse;

pub async fn create_reminder_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<LifeReminderContext>,
) -> Result<HttpResponse, LifeReminderError> {
    let body = body.0;
    let usecase = CreateReminderUseCase {
        user_id: body.user_id,
        title: body.title,
        date: body.date,
        reminder_type: body.reminder_type,
        remind_before_days: body.remind_before_days,
        repeat_every_year: body.repeat_every_year,
        notes: body.notes,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.reminder)))
        .map_err(LifeReminderError::from)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub user_id: ID,
    pub title: String,
    pub date: NaiveDate,
    pub reminder_type: Option<ReminderType>,
    pub remind_before_days: Option<u32>,
    pub repeat_every_year: Option<bool>,
    pub notes: Option<String>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub reminder: Reminder,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    UserNotFound,
    InvalidTitle,
    InvalidRemindBeforeDays(u32),
}

impl From<UseCaseError> for LifeReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::UserNotFound => {
                Self::NotFound("The requested user was not found.".into())
            }
            UseCaseError::InvalidTitle => {
                Self::BadClientData("A non-empty title is required.".into())
            }
            UseCaseError::InvalidRemindBeforeDays(days) => Self::BadClientData(format!(
                "remindBeforeDays: {} is out of range, it has to be between 0 and {}.",
                days, MAX_REMIND_BEFORE_DAYS
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(
        &mut self,
        ctx: &LifeReminderContext,
    ) -> Result<Self::Response, Self::Error> {
        if self.title.trim().is_empty() {
            return Err(UseCaseError::InvalidTitle);
        }
        if let Some(days) = self.remind_before_days {
            if days > MAX_REMIND_BEFORE_DAYS {
                return Err(UseCaseError::InvalidRemindBeforeDays(days));
            }
        }
        if ctx.repos.users.find(&self.user_id).await.is_none() {
            return Err(UseCaseError::UserNotFound);
        }

        let mut reminder = Reminder::new(self.user_id.clone(), self.title.clone(), self.date);
        if let Some(reminder_type) = self.reminder_type {
            reminder.reminder_type = reminder_type;
        }
        if let Some(days) = self.remind_before_days {
            reminder.remind_before_days = days;
        }
        if let Some(repeat_every_year) = self.repeat_every_year {
            reminder.repeat_every_year = repeat_every_year;
        }
        reminder.notes = self.notes.clone();

        match ctx.repos.reminders.insert(&reminder).await {
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
    async fn creates_a_reminder_with_defaults() {
        let ctx = setup_ctx();
        let user = User::new("9876543210".into());
        ctx.repos.users.insert(&user).await.unwrap();

        let usecase = CreateReminderUseCase {
            user_id: user.id.clone(),
            title: "Mom's birthday".into(),
            date: ymd(1970, 3, 10),
            reminder_type: Some(ReminderType::Birthday),
            remind_before_days: None,
            repeat_every_year: None,
            notes: None,
        };
        let res = execute(usecase, &ctx).await.unwrap();

        assert_eq!(res.reminder.remind_before_days, 1);
        assert!(res.reminder.repeat_every_year);
        assert!(res.reminder.is_active);
        assert!(res.reminder.last_notified_at.is_none());
        assert!(ctx.repos.reminders.find(&res.reminder.id).await.is_some());
    }

    #[tokio::test]
    async fn rejects_out_of_range_lead_time() {
        let ctx = setup_ctx();
        let user = User::new("9876543210".into());
        ctx.repos.users.insert(&user).await.unwrap();

        let usecase = CreateReminderUseCase {
            user_id: user.id.clone(),
            title: "Bill".into(),
            date: ymd(2026, 7, 1),
            reminder_type: None,
            remind_before_days: Some(MAX_REMIND_BEFORE_DAYS + 1),
            repeat_every_year: None,
            notes: None,
        };

        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::InvalidRemindBeforeDays(_))
        ));
    }

    #[tokio::test]
    async fn rejects_unknown_owner_and_empty_title() {
        let ctx = setup_ctx();

        let usecase = CreateReminderUseCase {
            user_id: ID::new(),
            title: "  ".into(),
            date: ymd(2026, 7, 1),
            reminder_type: None,
            remind_before_days: None,
            repeat_every_year: None,
            notes: None,
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::InvalidTitle)
        ));

        let usecase = CreateReminderUseCase {
            user_id: ID::new(),
            title: "Bill".into(),
            date: ymd(2026, 7, 1),
            reminder_type: None,
            remind_before_days: None,
            repeat_every_year: None,
            notes: None,
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::UserNotFound)
        ));
    }
}
