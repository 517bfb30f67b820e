use super::IMedicationHistoryRepo;
use crate::repos::shared::{mongo_repo, mongo_repo::MongoDocument};
use glucomate_domain::{MedicationHistoryEntry, ID};
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::FindOptions,
    Collection, Database,
};
use serde::{Deserialize, Serialize};

pub struct MongoMedicationHistoryRepo {
    collection: Collection<Document>,
}

impl MongoMedicationHistoryRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("med_history"),
        }
    }
}

#[async_trait::async_trait]
impl IMedicationHistoryRepo for MongoMedicationHistoryRepo {
    async fn insert(&self, entry: &MedicationHistoryEntry) -> anyhow::Result<()> {
        mongo_repo::insert::<_, MedicationHistoryEntryMongo>(&self.collection, entry).await
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<MedicationHistoryEntry>> {
        let filter = doc! {
            "user_id": user_id.inner_ref()
        };
        let options = FindOptions::builder().sort(doc! { "taken_at": -1 }).build();
        mongo_repo::find_many_by::<_, MedicationHistoryEntryMongo>(
            &self.collection,
            filter,
            Some(options),
        )
        .await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct MedicationHistoryEntryMongo {
    _id: ObjectId,
    user_id: ObjectId,
    medicine: String,
    taken_at: i64,
}

impl MongoDocument<MedicationHistoryEntry> for MedicationHistoryEntryMongo {
    fn to_domain(self) -> MedicationHistoryEntry {
        MedicationHistoryEntry {
            id: ID::from(self._id),
            user_id: ID::from(self.user_id),
            medicine: self.medicine,
            taken_at: self.taken_at,
        }
    }

    fn from_domain(entry: &MedicationHistoryEntry) -> Self {
        Self {
            _id: *entry.id.inner_ref(),
            user_id: *entry.user_id.inner_ref(),
            medicine: entry.medicine.clone(),
            taken_at: entry.taken_at,
        }
    }
}
