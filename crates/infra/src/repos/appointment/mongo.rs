use super::IAppointmentRepo;
use crate::repos::shared::{mongo_repo, mongo_repo::MongoDocument, repo::DeleteResult};
use glucomate_domain::{Appointment, ID};
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::FindOptions,
    Collection, Database,
};
use serde::{Deserialize, Serialize};

pub struct MongoAppointmentRepo {
    collection: Collection<Document>,
}

impl MongoAppointmentRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("appointments"),
        }
    }
}

#[async_trait::async_trait]
impl IAppointmentRepo for MongoAppointmentRepo {
    async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()> {
        mongo_repo::insert::<_, AppointmentMongo>(&self.collection, appointment).await
    }

    async fn find(&self, appointment_id: &ID) -> Option<Appointment> {
        mongo_repo::find::<_, AppointmentMongo>(&self.collection, appointment_id.inner_ref()).await
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Appointment>> {
        let filter = doc! {
            "user_id": user_id.inner_ref()
        };
        let options = FindOptions::builder().sort(doc! { "starts_at": 1 }).build();
        mongo_repo::find_many_by::<_, AppointmentMongo>(&self.collection, filter, Some(options))
            .await
    }

    async fn delete(&self, appointment_id: &ID) -> Option<Appointment> {
        mongo_repo::delete::<_, AppointmentMongo>(&self.collection, appointment_id.inner_ref())
            .await
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<DeleteResult> {
        let filter = doc! {
            "user_id": user_id.inner_ref()
        };
        mongo_repo::delete_many_by(&self.collection, filter).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct AppointmentMongo {
    _id: ObjectId,
    user_id: ObjectId,
    doctor: String,
    starts_at: i64,
    notes: String,
}

impl MongoDocument<Appointment> for AppointmentMongo {
    fn to_domain(self) -> Appointment {
        Appointment {
            id: ID::from(self._id),
            user_id: ID::from(self.user_id),
            doctor: self.doctor,
            starts_at: self.starts_at,
            notes: self.notes,
        }
    }

    fn from_domain(appointment: &Appointment) -> Self {
        Self {
            _id: *appointment.id.inner_ref(),
            user_id: *appointment.user_id.inner_ref(),
            doctor: appointment.doctor.clone(),
            starts_at: appointment.starts_at,
            notes: appointment.notes.clone(),
        }
    }
}
