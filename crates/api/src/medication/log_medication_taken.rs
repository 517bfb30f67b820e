use crate::error::GlucomateError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use glucomate_api_structs::log_medication_taken::{APIResponse, RequestBody};
use glucomate_domain::{is_valid_medicine_name, MedicationHistoryEntry, ID};
use glucomate_infra::GlucomateContext;

fn error_handler(e: UseCaseErrors) -> GlucomateError {
    match e {
        UseCaseErrors::InvalidMedicineName(name) => GlucomateError::BadClientData(format!(
            "Invalid medicine name: {:?}. Only letters, numbers, hyphens and spaces are allowed.",
            name
        )),
        UseCaseErrors::StorageError => GlucomateError::InternalError,
    }
}

pub async fn log_medication_taken_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<GlucomateContext>,
) -> Result<HttpResponse, GlucomateError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = LogMedicationTakenUseCase {
        user_id: user.id,
        medicine: body.into_inner().medicine,
    };

    execute(usecase, &ctx)
        .await
        .map(|entry| HttpResponse::Created().json(APIResponse::new(entry)))
        .map_err(error_handler)
}

/// Appends a "taken" entry to the history log. This is the only writer of
/// `med_history`; the delivery job never touches it.
#[derive(Debug)]
struct LogMedicationTakenUseCase {
    pub user_id: ID,
    pub medicine: String,
}

#[derive(Debug)]
enum UseCaseErrors {
    InvalidMedicineName(String),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for LogMedicationTakenUseCase {
    type Response = MedicationHistoryEntry;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "LogMedicationTaken";

    async fn execute(&mut self, ctx: &GlucomateContext) -> Result<Self::Response, Self::Errors> {
        if !is_valid_medicine_name(&self.medicine) {
            return Err(UseCaseErrors::InvalidMedicineName(self.medicine.clone()));
        }

        let entry = MedicationHistoryEntry::new(
            self.user_id.clone(),
            self.medicine.clone(),
            ctx.sys.get_timestamp_millis(),
        );

        match ctx.repos.med_history.insert(&entry).await {
            Ok(_) => Ok(entry),
            Err(_) => Err(UseCaseErrors::StorageError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn logs_taken_medication() {
        let ctx = GlucomateContext::create_inmemory();
        let user_id = ID::new();
        let usecase = LogMedicationTakenUseCase {
            user_id: user_id.clone(),
            medicine: "Metformin".into(),
        };

        let entry = execute(usecase, &ctx).await.unwrap();
        assert_eq!(entry.medicine, "Metformin");

        let history = ctx.repos.med_history.find_by_user(&user_id).await.unwrap();
        assert_eq!(history, vec![entry]);
    }

    #[actix_web::test]
    async fn rejects_invalid_medicine_name() {
        let ctx = GlucomateContext::create_inmemory();
        let usecase = LogMedicationTakenUseCase {
            user_id: ID::new(),
            medicine: "pills!!!".into(),
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseErrors::InvalidMedicineName(_))
        ));
    }
}
