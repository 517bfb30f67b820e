mod inmemory;
mod mongo;

pub use inmemory::InMemoryAppointmentRepo;
pub use mongo::MongoAppointmentRepo;

use crate::repos::shared::repo::DeleteResult;
use glucomate_domain::{Appointment, ID};

#[async_trait::async_trait]
pub trait IAppointmentRepo: Send + Sync {
    async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()>;
    async fn find(&self, appointment_id: &ID) -> Option<Appointment>;
    /// All appointments for the user, earliest first
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Appointment>>;
    async fn delete(&self, appointment_id: &ID) -> Option<Appointment>;
    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<DeleteResult>;
}
