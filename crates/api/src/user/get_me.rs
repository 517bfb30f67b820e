use crate::error::GlucomateError;
use crate::shared::auth::protect_route;
use actix_web::{web, HttpRequest, HttpResponse};
use glucomate_api_structs::get_me::APIResponse;
use glucomate_infra::GlucomateContext;

pub async fn get_me_controller(
    http_req: HttpRequest,
    ctx: web::Data<GlucomateContext>,
) -> Result<HttpResponse, GlucomateError> {
    let user = protect_route(&http_req, &ctx).await?;

    Ok(HttpResponse::Ok().json(APIResponse::new(user)))
}
