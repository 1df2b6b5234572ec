use super::dtos::ReminderResponse;
use crate::error::LifeReminderError;
use crate::shared::guard::Guard;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use lifereminder_domain::{Reminder, ReminderType, ID, MAX_REMIND_BEFORE_DAYS};
use lifereminder_infra::LifeReminderContext;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default, rename = "type")]
    pub reminder_type: Option<ReminderType>,
    #[serde(default)]
    pub remind_before_days: Option<u32>,
    #[serde(default)]
    pub repeat_every_year: Option<bool>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PathParams {
    pub reminder_id: String,
}

pub type APIResponse = ReminderResponse;

pub async fn update_reminder_controller(
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<LifeReminderContext>,
) -> Result<HttpResponse, LifeReminderError> {
    let reminder_id = Guard::against_malformed_id(path.reminder_id.clone())?;

    let body = body.0;
    let usecase = UpdateReminderUseCase {
        reminder_id,
        title: body.title,
        date: body.date,
        reminder_type: body.reminder_type,
        remind_before_days: body.remind_before_days,
        repeat_every_year: body.repeat_every_year,
        notes: body.notes,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.reminder)))
        .map_err(LifeReminderError::from)
}

#[derive(Debug)]
pub struct UpdateReminderUseCase {
    pub reminder_id: ID,
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
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
    ReminderNotFound,
    InvalidRemindBeforeDays(u32),
}

impl From<UseCaseError> for LifeReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::ReminderNotFound => {
                Self::NotFound("The requested reminder was not found.".into())
            }
            UseCaseError::InvalidRemindBeforeDays(days) => Self::BadClientData(format!(
                "remindBeforeDays: {} is out of range, it has to be between 0 and {}.",
                days, MAX_REMIND_BEFORE_DAYS
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateReminderUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "UpdateReminder";

    async fn execute(
        &mut self,
        ctx: &LifeReminderContext,
    ) -> Result<Self::Response, Self::Error> {
        if let Some(days) = self.remind_before_days {
            if days > MAX_REMIND_BEFORE_DAYS {
                return Err(UseCaseError::InvalidRemindBeforeDays(days));
            }
        }

        let mut reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Some(reminder) => reminder,
            None => return Err(UseCaseError::ReminderNotFound),
        };

        if let Some(title) = &self.title {
            reminder.title = title.clone();
        }
        if let Some(date) = self.date {
            reminder.date = date;
        }
        if let Some(reminder_type) = self.reminder_type {
            reminder.reminder_type = reminder_type;
        }
        if let Some(days) = self.remind_before_days {
            reminder.remind_before_days = days;
        }
        if let Some(repeat_every_year) = self.repeat_every_year {
            reminder.repeat_every_year = repeat_every_year;
        }
        if let Some(notes) = &self.notes {
            reminder.notes = Some(notes.clone());
        }

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
    async fn updates_only_the_provided_fields() {
        let ctx = setup_ctx();
        let user = User::new("9876543210".into());
        ctx.repos.users.insert(&user).await.unwrap();
        let reminder = Reminder::new(user.id.clone(), "Rent".into(), ymd(2026, 7, 1));
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let usecase = UpdateReminderUseCase {
            reminder_id: reminder.id.clone(),
            title: Some("Rent transfer".into()),
            date: None,
            reminder_type: Some(ReminderType::Bill),
            remind_before_days: Some(3),
            repeat_every_year: None,
            notes: None,
        };
        let res = execute(usecase, &ctx).await.unwrap();

        assert_eq!(res.reminder.title, "Rent transfer");
        assert_eq!(res.reminder.reminder_type, ReminderType::Bill);
        assert_eq!(res.reminder.remind_before_days, 3);
        // Untouched fields stay as they were
        assert_eq!(res.reminder.date, reminder.date);
        assert_eq!(res.reminder.repeat_every_year, reminder.repeat_every_year);
    }

    #[tokio::test]
    async fn rejects_out_of_range_lead_time_before_loading() {
        let ctx = setup_ctx();

        let usecase = UpdateReminderUseCase {
            reminder_id: ID::new(),
            title: None,
            date: None,
            reminder_type: None,
            remind_before_days: Some(400),
            repeat_every_year: None,
            notes: None,
        };

        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::InvalidRemindBeforeDays(400))
        ));
    }
}
