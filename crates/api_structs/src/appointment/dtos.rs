use glucomate_domain::{Appointment, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDTO {
    pub id: ID,
    pub doctor: String,
    pub starts_at: i64,
    pub notes: String,
}

impl AppointmentDTO {
    pub fn new(appointment: Appointment) -> Self {
        Self {
            id: appointment.id.clone(),
            doctor: appointment.doctor,
            starts_at: appointment.starts_at,
            notes: appointment.notes,
        }
    }
}
