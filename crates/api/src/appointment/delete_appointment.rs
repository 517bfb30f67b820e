use crate::error::GlucomateError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use glucomate_api_structs::delete_appointment::{APIResponse, PathParams};
use glucomate_domain::{Appointment, ID};
use glucomate_infra::GlucomateContext;

pub async fn delete_appointment_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<GlucomateContext>,
) -> Result<HttpResponse, GlucomateError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteAppointmentUseCase {
        user_id: user.id,
        appointment_id: path_params.appointment_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|appointment| HttpResponse::Ok().json(APIResponse::new(appointment)))
        .map_err(|e| match e {
            UseCaseErrors::NotFound => {
                GlucomateError::NotFound("The requested appointment was not found.".to_string())
            }
        })
}

#[derive(Debug)]
struct DeleteAppointmentUseCase {
    pub user_id: ID,
    pub appointment_id: ID,
}

#[derive(Debug)]
enum UseCaseErrors {
    NotFound,
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteAppointmentUseCase {
    type Response = Appointment;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "DeleteAppointment";

    async fn execute(&mut self, ctx: &GlucomateContext) -> Result<Self::Response, Self::Errors> {
        match ctx.repos.appointments.find(&self.appointment_id).await {
            Some(appointment) if appointment.user_id == self.user_id => (),
            _ => return Err(UseCaseErrors::NotFound),
        }

        ctx.repos
            .appointments
            .delete(&self.appointment_id)
            .await
            .ok_or(UseCaseErrors::NotFound)
    }
}
