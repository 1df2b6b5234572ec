mod create_reminder;
mod delete_reminder;
mod dtos;
mod get_reminder;
mod get_user_reminders;
mod update_reminder;

use actix_web::web;
use create_reminder::create_reminder_controller;
use delete_reminder::delete_reminder_controller;
use get_reminder::get_reminder_controller;
use get_user_reminders::get_user_reminders_controller;
use update_reminder::update_reminder_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminder", web::post().to(create_reminder_controller));
    cfg.route(
        "/reminder/{reminder_id}",
        web::get().to(get_reminder_controller),
    );
    cfg.route(
        "/reminder/{reminder_id}",
        web::put().to(update_reminder_controller),
    );
    cfg.route(
        "/reminder/{reminder_id}",
        web::delete().to(delete_reminder_controller),
    );
    cfg.route(
        "/user/{user_id}/reminders",
        web::get().to(get_user_reminders_controller),
    );
}
