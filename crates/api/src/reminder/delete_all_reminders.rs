use crate::error::GlucomateError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use glucomate_api_structs::delete_all_reminders::APIResponse;
use glucomate_domain::ID;
use glucomate_infra::GlucomateContext;

pub async fn delete_all_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<GlucomateContext>,
) -> Result<HttpResponse, GlucomateError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteAllRemindersUseCase { user_id: user.id };

    execute(usecase, &ctx)
        .await
        .map(|deleted_count| HttpResponse::Ok().json(APIResponse { deleted_count }))
        .map_err(|e| match e {
            UseCaseErrors::StorageError => GlucomateError::InternalError,
        })
}

#[derive(Debug)]
struct DeleteAllRemindersUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
enum UseCaseErrors {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteAllRemindersUseCase {
    type Response = i64;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "DeleteAllReminders";

    async fn execute(&mut self, ctx: &GlucomateContext) -> Result<Self::Response, Self::Errors> {
        ctx.repos
            .reminders
            .delete_by_user(&self.user_id)
            .await
            .map(|res| res.deleted_count)
            .map_err(|_| UseCaseErrors::StorageError)
    }
}
