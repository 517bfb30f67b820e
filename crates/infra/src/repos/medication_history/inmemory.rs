use super::IMedicationHistoryRepo;
use crate::repos::shared::inmemory_repo::*;
use glucomate_domain::{MedicationHistoryEntry, ID};

pub struct InMemoryMedicationHistoryRepo {
    entries: std::sync::Mutex<Vec<MedicationHistoryEntry>>,
}

impl InMemoryMedicationHistoryRepo {
    pub fn new() -> Self {
        Self {
            entries: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IMedicationHistoryRepo for InMemoryMedicationHistoryRepo {
    async fn insert(&self, entry: &MedicationHistoryEntry) -> anyhow::Result<()> {
        insert(entry, &self.entries);
        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<MedicationHistoryEntry>> {
        let mut entries = find_by(&self.entries, |e| e.user_id == *user_id);
        entries.sort_by_key(|e| std::cmp::Reverse(e.taken_at));
        Ok(entries)
    }
}
