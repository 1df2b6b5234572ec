use super::dtos::UserResponse;
use crate::error::LifeReminderError;
use crate::shared::guard::Guard;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use lifereminder_domain::{NotificationPreferences, User, ID};
use lifereminder_infra::LifeReminderContext;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub whatsapp_number: Option<String>,
    #[serde(default)]
    pub notification_preferences: Option<NotificationPreferences>,
}

#[derive(Debug, Deserialize)]
pub struct PathParams {
    pub user_id: String,
}

pub type APIResponse = UserResponse;

pub async fn update_user_controller(
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<LifeReminderContext>,
) -> Result<HttpResponse, LifeReminderError> {
    let user_id = Guard::against_malformed_id(path.user_id.clone())?;

    let body = body.0;
    let usecase = UpdateUserUseCase {
        user_id,
        name: body.name,
        country_code: body.country_code,
        email: body.email,
        whatsapp_number: body.whatsapp_number,
        notification_preferences: body.notification_preferences,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.user)))
        .map_err(LifeReminderError::from)
}

#[derive(Debug)]
pub struct UpdateUserUseCase {
    pub user_id: ID,
    pub name: Option<String>,
    pub country_code: Option<String>,
    pub email: Option<String>,
    pub whatsapp_number: Option<String>,
    pub notification_preferences: Option<NotificationPreferences>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub user: User,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    UserNotFound,
}

impl From<UseCaseError> for LifeReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::UserNotFound => {
                Self::NotFound("The requested user was not found.".into())
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateUserUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "UpdateUser";

    async fn execute(
        &mut self,
        ctx: &LifeReminderContext,
    ) -> Result<Self::Response, Self::Error> {
        let mut user = match ctx.repos.users.find(&self.user_id).await {
            Some(user) => user,
            None => return Err(UseCaseError::UserNotFound),
        };

        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(country_code) = &self.country_code {
            user.country_code = country_code.clone();
        }
        if let Some(email) = &self.email {
            user.email = Some(email.clone());
        }
        if let Some(whatsapp_number) = &self.whatsapp_number {
            user.whatsapp_number = Some(whatsapp_number.clone());
        }
        if let Some(preferences) = self.notification_preferences {
            user.preferences = preferences;
        }

        match ctx.repos.users.save(&user).await {
            Ok(_) => Ok(UseCaseRes { user }),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::test_helpers::setup_ctx;

    #[tokio::test]
    async fn updates_notification_preferences() {
        let ctx = setup_ctx();
        let user = User::new("9876543210".into());
        ctx.repos.users.insert(&user).await.unwrap();

        let usecase = UpdateUserUseCase {
            user_id: user.id.clone(),
            name: Some("Asha".into()),
            country_code: None,
            email: Some("asha@example.com".into()),
            whatsapp_number: None,
            notification_preferences: Some(NotificationPreferences {
                email: true,
                whatsapp: false,
            }),
        };
        let res = execute(usecase, &ctx).await.unwrap();

        assert_eq!(res.user.name, "Asha");
        assert_eq!(res.user.email.as_deref(), Some("asha@example.com"));
        assert!(!res.user.preferences.whatsapp);

        let stored = ctx.repos.users.find(&user.id).await.unwrap();
        assert_eq!(stored, res.user);
    }

    #[tokio::test]
    async fn unknown_user_is_rejected() {
        let ctx = setup_ctx();

        let usecase = UpdateUserUseCase {
            user_id: ID::new(),
            name: None,
            country_code: None,
            email: None,
            whatsapp_number: None,
            notification_preferences: None,
        };

        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::UserNotFound)
        ));
    }
}
