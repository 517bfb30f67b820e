use actix_web::web;

mod get_nutrition;

use get_nutrition::get_nutrition_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/nutrition", web::get().to(get_nutrition_controller));
}
