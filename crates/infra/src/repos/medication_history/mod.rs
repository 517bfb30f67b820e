mod inmemory;
mod mongo;

pub use inmemory::InMemoryMedicationHistoryRepo;
pub use mongo::MongoMedicationHistoryRepo;

use glucomate_domain::{MedicationHistoryEntry, ID};

/// Append-only log of "mark as taken" events. There is deliberately no
/// delete operation.
#[async_trait::async_trait]
pub trait IMedicationHistoryRepo: Send + Sync {
    async fn insert(&self, entry: &MedicationHistoryEntry) -> anyhow::Result<()>;
    /// The user's history, most recent first
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<MedicationHistoryEntry>>;
}
