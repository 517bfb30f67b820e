use actix_web::web;

mod create_appointment;
mod delete_appointment;
mod get_appointments;

use create_appointment::create_appointment_controller;
use delete_appointment::delete_appointment_controller;
use get_appointments::get_appointments_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/appointment", web::post().to(create_appointment_controller));
    cfg.route("/appointment", web::get().to(get_appointments_controller));
    cfg.route(
        "/appointment/{appointment_id}",
        web::delete().to(delete_appointment_controller),
    );
}
