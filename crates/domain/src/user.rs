use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// A `User` owns `Reminder`s and receives the notifications for them. The
/// engine only ever reads users, all mutation happens in the CRUD layer.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub name: String,
    pub phone: String,
    pub country_code: String,
    pub email: Option<String>,
    /// Dedicated WhatsApp number, falls back to country code + phone
    pub whatsapp_number: Option<String>,
    pub preferences: NotificationPreferences,
}

impl User {
    pub fn new(phone: String) -> Self {
        Self {
            id: Default::default(),
            name: String::new(),
            phone,
            country_code: "+91".into(),
            email: None,
            whatsapp_number: None,
            preferences: Default::default(),
        }
    }

    /// The address WhatsApp messages for this user go to
    pub fn whatsapp_recipient(&self) -> String {
        match &self.whatsapp_number {
            Some(number) => number.clone(),
            None => format!("{}{}", self.country_code, self.phone),
        }
    }
}

impl Entity for User {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

/// Per-channel opt-in flags, both channels are enabled by default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    pub email: bool,
    pub whatsapp: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email: true,
            whatsapp: true,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn whatsapp_recipient_prefers_dedicated_number() {
        let mut user = User::new("9876543210".into());
        assert_eq!(user.whatsapp_recipient(), "+919876543210");

        user.whatsapp_number = Some("+4712345678".into());
        assert_eq!(user.whatsapp_recipient(), "+4712345678");
    }

    #[test]
    fn both_channels_are_enabled_by_default() {
        let user = User::new("9876543210".into());
        assert!(user.preferences.email);
        assert!(user.preferences.whatsapp);
    }
}
