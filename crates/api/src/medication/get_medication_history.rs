use crate::error::GlucomateError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use glucomate_api_structs::get_medication_history::APIResponse;
use glucomate_domain::{MedicationHistoryEntry, ID};
use glucomate_infra::GlucomateContext;

pub async fn get_medication_history_controller(
    http_req: HttpRequest,
    ctx: web::Data<GlucomateContext>,
) -> Result<HttpResponse, GlucomateError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetMedicationHistoryUseCase { user_id: user.id };

    execute(usecase, &ctx)
        .await
        .map(|history| HttpResponse::Ok().json(APIResponse::new(history)))
        .map_err(|e| match e {
            UseCaseErrors::StorageError => GlucomateError::InternalError,
        })
}

#[derive(Debug)]
struct GetMedicationHistoryUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
enum UseCaseErrors {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetMedicationHistoryUseCase {
    type Response = Vec<MedicationHistoryEntry>;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "GetMedicationHistory";

    async fn execute(&mut self, ctx: &GlucomateContext) -> Result<Self::Response, Self::Errors> {
        ctx.repos
            .med_history
            .find_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseErrors::StorageError)
    }
}
