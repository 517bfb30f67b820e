use actix_web::web;

mod create_reminder;
mod delete_all_reminders;
mod delete_reminder;
mod get_reminders;

pub mod dispatcher;
pub mod get_due_reminders;

use create_reminder::create_reminder_controller;
use delete_all_reminders::delete_all_reminders_controller;
use delete_reminder::delete_reminder_controller;
use get_reminders::get_reminders_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminder", web::post().to(create_reminder_controller));
    cfg.route("/reminder", web::get().to(get_reminders_controller));
    cfg.route(
        "/reminder/{reminder_id}",
        web::delete().to(delete_reminder_controller),
    );
    cfg.route("/reminder", web::delete().to(delete_all_reminders_controller));
}
