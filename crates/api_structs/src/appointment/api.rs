use crate::appointment::dtos::AppointmentDTO;
use glucomate_domain::{Appointment, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentResponse {
    pub appointment: AppointmentDTO,
}

impl AppointmentResponse {
    pub fn new(appointment: Appointment) -> Self {
        Self {
            appointment: AppointmentDTO::new(appointment),
        }
    }
}

pub mod create_appointment {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub doctor: String,
        /// Start of the appointment in millis since epoch
        pub starts_at: i64,
        pub notes: Option<String>,
    }

    pub type APIResponse = AppointmentResponse;
}

pub mod get_appointments {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub appointments: Vec<AppointmentDTO>,
    }

    impl APIResponse {
        pub fn new(appointments: Vec<Appointment>) -> Self {
            Self {
                appointments: appointments.into_iter().map(AppointmentDTO::new).collect(),
            }
        }
    }
}

pub mod delete_appointment {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub appointment_id: ID,
    }

    pub type APIResponse = AppointmentResponse;
}
