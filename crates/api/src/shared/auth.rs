use crate::error::GlucomateError;
use actix_web::HttpRequest;
use glucomate_domain::User;
use glucomate_infra::GlucomateContext;

const API_KEY_HEADER: &str = "x-api-key";

/// Resolves the authenticated `User` from the `x-api-key` header. Every
/// route except signup and the health check goes through here, so the
/// owning user is always an explicit value, never ambient state.
pub async fn protect_route(
    http_req: &HttpRequest,
    ctx: &GlucomateContext,
) -> Result<User, GlucomateError> {
    let api_key = http_req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            GlucomateError::Unauthorized(format!(
                "Request is missing the `{}` header",
                API_KEY_HEADER
            ))
        })?;

    ctx.repos
        .users
        .find_by_api_key(api_key)
        .await
        .ok_or_else(|| {
            GlucomateError::Unauthorized("No user was found with the given api key".into())
        })
}
