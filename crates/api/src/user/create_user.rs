use super::dtos::UserResponse;
use crate::error::LifeReminderError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use lifereminder_domain::User;
use lifereminder_infra::LifeReminderContext;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    #[serde(default)]
    pub name: Option<String>,
    pub phone: String,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub whatsapp_number: Option<String>,
}

pub type APIResponse = UserResponse;

pub async fn create_user_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<LifeReminderContext>,
) -> Result<HttpResponse, LifeReminderError> {
    let body = body.0;
    let usecase = CreateUserUseCase {
        name: body.name,
        phone: body.phone,
        country_code: body.country_code,
        email: body.email,
        whatsapp_number: body.whatsapp_number,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.user)))
        .map_err(LifeReminderError::from)
}

#[derive(Debug)]
pub struct CreateUserUseCase {
    pub name: Option<String>,
    pub phone: String,
    pub country_code: Option<String>,
    pub email: Option<String>,
    pub whatsapp_number: Option<String>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub user: User,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    UserAlreadyExists,
    InvalidPhone,
}

impl From<UseCaseError> for LifeReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::UserAlreadyExists => Self::Conflict(
                "A user with that phone number already exists. Phone numbers need to be unique."
                    .into(),
            ),
            UseCaseError::InvalidPhone => {
                Self::BadClientData("A non-empty phone number is required.".into())
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateUserUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateUser";

    async fn execute(
        &mut self,
        ctx: &LifeReminderContext,
    ) -> Result<Self::Response, Self::Error> {
        if self.phone.trim().is_empty() {
            return Err(UseCaseError::InvalidPhone);
        }

        if ctx.repos.users.find_by_phone(&self.phone).await.is_some() {
            return Err(UseCaseError::UserAlreadyExists);
        }

        let mut user = User::new(self.phone.clone());
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(country_code) = &self.country_code {
            user.country_code = country_code.clone();
        }
        user.email = self.email.clone();
        user.whatsapp_number = self.whatsapp_number.clone();

        match ctx.repos.users.insert(&user).await {
            Ok(_) => Ok(UseCaseRes { user }),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}
