use super::dtos::UserResponse;
use crate::error::LifeReminderError;
use crate::shared::guard::Guard;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use lifereminder_domain::{User, ID};
use lifereminder_infra::LifeReminderContext;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PathParams {
    pub user_id: String,
}

pub type APIResponse = UserResponse;

pub async fn get_user_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<LifeReminderContext>,
) -> Result<HttpResponse, LifeReminderError> {
    let user_id = Guard::against_malformed_id(path.user_id.clone())?;

    let usecase = GetUserUseCase { user_id };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.user)))
        .map_err(LifeReminderError::from)
}

#[derive(Debug)]
pub struct GetUserUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub user: User,
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
impl UseCase for GetUserUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "GetUser";

    async fn execute(
        &mut self,
        ctx: &LifeReminderContext,
    ) -> Result<Self::Response, Self::Error> {
        match ctx.repos.users.find(&self.user_id).await {
            Some(user) => Ok(UseCaseRes { user }),
            None => Err(UseCaseError::UserNotFound),
        }
    }
}
