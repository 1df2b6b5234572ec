use super::dtos::NotificationLogDTO;
use crate::error::LifeReminderError;
use crate::shared::guard::Guard;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use lifereminder_domain::{NotificationLogEntry, ID};
use lifereminder_infra::LifeReminderContext;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct PathParams {
    pub user_id: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct APIResponse {
    pub notifications: Vec<NotificationLogDTO>,
}

impl APIResponse {
    pub fn new(entries: Vec<NotificationLogEntry>) -> Self {
        Self {
            notifications: entries.into_iter().map(NotificationLogDTO::new).collect(),
        }
    }
}

pub async fn get_user_notifications_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<LifeReminderContext>,
) -> Result<HttpResponse, LifeReminderError> {
    let user_id = Guard::against_malformed_id(path.user_id.clone())?;

    let usecase = GetUserNotificationsUseCase { user_id };

    execute(usecase, &ctx)
        .await
        .map(|entries| HttpResponse::Ok().json(APIResponse::new(entries)))
        .map_err(LifeReminderError::from)
}

#[derive(Debug)]
pub struct GetUserNotificationsUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    UserNotFound,
}

impl From<UseCaseError> for LifeReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::UserNotFound => {
                Self::NotFound("The requested user was not found.".into())
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUserNotificationsUseCase {
    type Response = Vec<NotificationLogEntry>;
    type Error = UseCaseError;

    const NAME: &'static str = "GetUserNotifications";

    async fn execute(
        &mut self,
        ctx: &LifeReminderContext,
    ) -> Result<Self::Response, Self::Error> {
        if ctx.repos.users.find(&self.user_id).await.is_none() {
            return Err(UseCaseError::UserNotFound);
        }

        Ok(ctx.repos.notification_logs.find_by_user(&self.user_id).await)
    }
}
