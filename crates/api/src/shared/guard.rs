use crate::error::LifeReminderError;
use lifereminder_domain::ID;

pub struct Guard {}

impl Guard {
    pub fn against_malformed_id(val: String) -> Result<ID, LifeReminderError> {
        val.parse()
            .map_err(|e| LifeReminderError::BadClientData(format!("{}", e)))
    }
}
