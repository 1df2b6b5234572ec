use lifereminder_domain::{NotificationPreferences, User, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: ID,
    pub name: String,
    pub phone: String,
    pub country_code: String,
    pub email: Option<String>,
    pub whatsapp_number: Option<String>,
    pub notification_preferences: NotificationPreferences,
}

impl UserDTO {
    pub fn new(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            phone: user.phone,
            country_code: user.country_code,
            email: user.email,
            whatsapp_number: user.whatsapp_number,
            notification_preferences: user.preferences,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user: UserDTO,
}

impl UserResponse {
    pub fn new(user: User) -> Self {
        Self {
            user: UserDTO::new(user),
        }
    }
}
