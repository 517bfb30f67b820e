mod appointment;
mod medication_history;
mod reminder;
mod shared;
mod user;

use appointment::{IAppointmentRepo, InMemoryAppointmentRepo, MongoAppointmentRepo};
use medication_history::{
    IMedicationHistoryRepo, InMemoryMedicationHistoryRepo, MongoMedicationHistoryRepo,
};
use mongodb::{
    bson::{doc, Document},
    options::ClientOptions,
    Client,
};
use reminder::{IReminderRepo, InMemoryReminderRepo, MongoReminderRepo};
use std::sync::Arc;
use tracing::info;
use user::{IUserRepo, InMemoryUserRepo, MongoUserRepo};

pub use shared::repo::DeleteResult;

#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<dyn IReminderRepo>,
    pub appointments: Arc<dyn IAppointmentRepo>,
    pub med_history: Arc<dyn IMedicationHistoryRepo>,
    pub users: Arc<dyn IUserRepo>,
}

impl Repos {
    pub async fn create_mongodb(
        connection_string: &str,
        db_name: &str,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let client_options = ClientOptions::parse(connection_string).await?;
        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // This is needed to make sure that db is ready when opening server
        info!("DB CHECKING CONNECTION ...");
        db.collection::<Document>("server-start")
            .insert_one(
                doc! {
                "server-start": 1
                },
                None,
            )
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");
        Ok(Self {
            reminders: Arc::new(MongoReminderRepo::new(&db)),
            appointments: Arc::new(MongoAppointmentRepo::new(&db)),
            med_history: Arc::new(MongoMedicationHistoryRepo::new(&db)),
            users: Arc::new(MongoUserRepo::new(&db)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            reminders: Arc::new(InMemoryReminderRepo::new()),
            appointments: Arc::new(InMemoryAppointmentRepo::new()),
            med_history: Arc::new(InMemoryMedicationHistoryRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
        }
    }
}
