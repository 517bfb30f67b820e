use super::IReminderRepo;
use crate::repos::shared::repo::DeleteResult;
use futures::stream::StreamExt;
use glucomate_domain::{Recurrence, Reminder, ID};
use mongodb::{
    bson::{doc, oid::ObjectId, to_bson, Document},
    options::FindOptions,
    Collection, Database,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

pub struct MongoReminderRepo {
    collection: Collection<Document>,
}

impl MongoReminderRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("reminders"),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for MongoReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        let raw = ReminderMongo::from_domain(reminder);
        let doc = to_bson(&raw)?
            .as_document()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Reminder did not serialize to a document"))?;
        self.collection.insert_one(doc, None).await?;
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        let filter = doc! {
            "_id": reminder_id.inner_ref()
        };
        match self.collection.find_one(filter, None).await {
            Ok(doc) => doc.and_then(reminder_from_doc),
            Err(e) => {
                error!("Error querying reminders: {:?}", e);
                None
            }
        }
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let filter = doc! {
            "user_id": user_id.inner_ref()
        };
        // Zero-padded "HH:MM" strings sort chronologically
        let options = FindOptions::builder().sort(doc! { "time": 1 }).build();

        let mut cursor = self.collection.find(filter, options).await?;
        let mut reminders = Vec::new();
        while let Some(result) = cursor.next().await {
            if let Some(reminder) = reminder_from_doc(result?) {
                reminders.push(reminder);
            }
        }
        Ok(reminders)
    }

    async fn delete(&self, reminder_id: &ID) -> Option<Reminder> {
        let filter = doc! {
            "_id": reminder_id.inner_ref()
        };
        match self.collection.find_one_and_delete(filter, None).await {
            Ok(doc) => doc.and_then(reminder_from_doc),
            Err(e) => {
                error!("Error deleting reminder: {:?}", e);
                None
            }
        }
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<DeleteResult> {
        let filter = doc! {
            "user_id": user_id.inner_ref()
        };
        let res = self.collection.delete_many(filter, None).await?;
        Ok(DeleteResult {
            deleted_count: res.deleted_count as i64,
        })
    }
}

/// Decodes a stored reminder, dropping (with a warning) documents whose
/// time or frequency no longer parses. A corrupt row must never crash the
/// delivery job.
fn reminder_from_doc(doc: Document) -> Option<Reminder> {
    let raw: ReminderMongo = match mongodb::bson::from_document(doc) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Dropping reminder document that could not be deserialized: {:?}", e);
            return None;
        }
    };
    match raw.to_domain() {
        Some(reminder) => Some(reminder),
        None => {
            warn!("Dropping reminder with malformed time or frequency");
            None
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ReminderMongo {
    _id: ObjectId,
    user_id: ObjectId,
    medicine: String,
    time: String,
    frequency: String,
    created_at: i64,
}

impl ReminderMongo {
    fn to_domain(self) -> Option<Reminder> {
        let time_of_day = self.time.parse().ok()?;
        let recurrence = Recurrence::from_label(&self.frequency)?;
        Some(Reminder {
            id: ID::from(self._id),
            user_id: ID::from(self.user_id),
            medicine: self.medicine,
            time_of_day,
            recurrence,
            created_at: self.created_at,
        })
    }

    fn from_domain(reminder: &Reminder) -> Self {
        Self {
            _id: *reminder.id.inner_ref(),
            user_id: *reminder.user_id.inner_ref(),
            medicine: reminder.medicine.clone(),
            time: reminder.time_of_day.to_string(),
            frequency: reminder.recurrence.label(),
            created_at: reminder.created_at,
        }
    }
}
