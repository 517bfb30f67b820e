use crate::error::GlucomateError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use glucomate_api_structs::create_appointment::{APIResponse, RequestBody};
use glucomate_domain::{Appointment, ID};
use glucomate_infra::GlucomateContext;

fn error_handler(e: UseCaseErrors) -> GlucomateError {
    match e {
        UseCaseErrors::EmptyDoctorName => {
            GlucomateError::BadClientData("Doctor's name cannot be empty.".to_string())
        }
        UseCaseErrors::StorageError => GlucomateError::InternalError,
    }
}

pub async fn create_appointment_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<GlucomateContext>,
) -> Result<HttpResponse, GlucomateError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.into_inner();
    let usecase = CreateAppointmentUseCase {
        user_id: user.id,
        doctor: body.doctor,
        starts_at: body.starts_at,
        notes: body.notes.unwrap_or_default(),
    };

    execute(usecase, &ctx)
        .await
        .map(|appointment| HttpResponse::Created().json(APIResponse::new(appointment)))
        .map_err(error_handler)
}

#[derive(Debug)]
struct CreateAppointmentUseCase {
    pub user_id: ID,
    pub doctor: String,
    pub starts_at: i64,
    pub notes: String,
}

#[derive(Debug)]
enum UseCaseErrors {
    EmptyDoctorName,
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateAppointmentUseCase {
    type Response = Appointment;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "CreateAppointment";

    async fn execute(&mut self, ctx: &GlucomateContext) -> Result<Self::Response, Self::Errors> {
        if self.doctor.trim().is_empty() {
            return Err(UseCaseErrors::EmptyDoctorName);
        }

        let appointment = Appointment::new(
            self.user_id.clone(),
            self.doctor.clone(),
            self.starts_at,
            self.notes.clone(),
        );

        match ctx.repos.appointments.insert(&appointment).await {
            Ok(_) => Ok(appointment),
            Err(_) => Err(UseCaseErrors::StorageError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn creates_appointment() {
        let ctx = GlucomateContext::create_inmemory();
        let user_id = ID::new();
        let usecase = CreateAppointmentUseCase {
            user_id: user_id.clone(),
            doctor: "Dr. Smith".into(),
            starts_at: 1705305600000,
            notes: "Bring blood sugar log".into(),
        };

        let appointment = execute(usecase, &ctx).await.unwrap();
        assert_eq!(appointment.doctor, "Dr. Smith");

        let stored = ctx.repos.appointments.find_by_user(&user_id).await.unwrap();
        assert_eq!(stored, vec![appointment]);
    }

    #[actix_web::test]
    async fn rejects_blank_doctor_name() {
        let ctx = GlucomateContext::create_inmemory();
        let usecase = CreateAppointmentUseCase {
            user_id: ID::new(),
            doctor: "  ".into(),
            starts_at: 0,
            notes: String::new(),
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseErrors::EmptyDoctorName)
        ));
    }
}
