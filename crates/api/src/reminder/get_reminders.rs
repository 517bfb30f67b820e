use crate::error::GlucomateError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use glucomate_api_structs::get_reminders::APIResponse;
use glucomate_domain::{Reminder, ID};
use glucomate_infra::GlucomateContext;

pub async fn get_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<GlucomateContext>,
) -> Result<HttpResponse, GlucomateError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetRemindersUseCase { user_id: user.id };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(|e| match e {
            UseCaseErrors::StorageError => GlucomateError::InternalError,
        })
}

#[derive(Debug)]
struct GetRemindersUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
enum UseCaseErrors {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetRemindersUseCase {
    type Response = Vec<Reminder>;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "GetReminders";

    async fn execute(&mut self, ctx: &GlucomateContext) -> Result<Self::Response, Self::Errors> {
        ctx.repos
            .reminders
            .find_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseErrors::StorageError)
    }
}
