use actix_web::web;

mod get_medication_history;
mod log_medication_taken;

use get_medication_history::get_medication_history_controller;
use log_medication_taken::log_medication_taken_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/medication/taken",
        web::post().to(log_medication_taken_controller),
    );
    cfg.route(
        "/medication/history",
        web::get().to(get_medication_history_controller),
    );
}
