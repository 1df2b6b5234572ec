pub mod date;
mod notification_log;
mod reminder;
mod shared;
mod user;

pub use notification_log::{Channel, DeliveryStatus, NotificationLogEntry};
pub use reminder::{Reminder, ReminderType, Urgency, MAX_REMIND_BEFORE_DAYS};
pub use shared::entity::{Entity, ID};
pub use user::{NotificationPreferences, User};
