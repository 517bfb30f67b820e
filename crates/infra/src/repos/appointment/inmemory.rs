use super::IAppointmentRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use glucomate_domain::{Appointment, ID};

pub struct InMemoryAppointmentRepo {
    appointments: std::sync::Mutex<Vec<Appointment>>,
}

impl InMemoryAppointmentRepo {
    pub fn new() -> Self {
        Self {
            appointments: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IAppointmentRepo for InMemoryAppointmentRepo {
    async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()> {
        insert(appointment, &self.appointments);
        Ok(())
    }

    async fn find(&self, appointment_id: &ID) -> Option<Appointment> {
        find(appointment_id, &self.appointments)
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Appointment>> {
        let mut appointments = find_by(&self.appointments, |a| a.user_id == *user_id);
        appointments.sort_by_key(|a| a.starts_at);
        Ok(appointments)
    }

    async fn delete(&self, appointment_id: &ID) -> Option<Appointment> {
        delete(appointment_id, &self.appointments)
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.appointments, |a| a.user_id == *user_id))
    }
}
