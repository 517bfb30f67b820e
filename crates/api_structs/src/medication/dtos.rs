use glucomate_domain::{MedicationHistoryEntry, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MedicationHistoryEntryDTO {
    pub id: ID,
    pub medicine: String,
    pub taken_at: i64,
}

impl MedicationHistoryEntryDTO {
    pub fn new(entry: MedicationHistoryEntry) -> Self {
        Self {
            id: entry.id.clone(),
            medicine: entry.medicine,
            taken_at: entry.taken_at,
        }
    }
}
