use actix_web::web;

mod send_message;

use send_message::send_assistant_message_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/assistant/message",
        web::post().to(send_assistant_message_controller),
    );
}
