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

pub async fn get_reminder_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<LifeReminderContext>,
) -> Result<HttpResponse, LifeReminderError> {
    let reminder_id = Guard::against_malformed_id(path.reminder_id.clone())?;

    let usecase = GetReminderUseCase { reminder_id };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.reminder)))
        .map_err(LifeReminderError::from)
}

#[derive(Debug)]
pub struct GetReminderUseCase {
    pub reminder_id: ID,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub reminder: Reminder,
}

#[derive(Debug)]
pub enum UseCaseError {
    ReminderNotFound,
}

impl From<UseCaseError> for LifeReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::ReminderNotFound => {
                Self::NotFound("The requested reminder was not found.".into())
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetReminderUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "GetReminder";

    async fn execute(
        &mut self,
        ctx: &LifeReminderContext,
    ) -> Result<Self::Response, Self::Error> {
        match ctx.repos.reminders.find(&self.reminder_id).await {
            Some(reminder) => Ok(UseCaseRes { reminder }),
            None => Err(UseCaseError::ReminderNotFound),
        }
    }
}
