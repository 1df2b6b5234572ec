mod dtos;
mod get_due_reminders;
mod get_user_notifications;
mod process_reminders;
pub mod templates;
#[cfg(test)]
pub(crate) mod test_helpers;

use actix_web::web;
pub use get_due_reminders::{DueReminder, GetDueRemindersUseCase};
use get_user_notifications::get_user_notifications_controller;
pub use process_reminders::ProcessRemindersUseCase;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/user/{user_id}/notifications",
        web::get().to(get_user_notifications_controller),
    );
}
