use crate::shared::entity::{Entity, ID};

/// One "mark as taken" event. Append-only: entries are written by explicit
/// user action and never touched by the delivery job.
#[derive(Debug, Clone, PartialEq)]
pub struct MedicationHistoryEntry {
    pub id: ID,
    pub user_id: ID,
    pub medicine: String,
    /// When the dose was logged, millis since epoch
    pub taken_at: i64,
}

impl MedicationHistoryEntry {
    pub fn new(user_id: ID, medicine: String, taken_at: i64) -> Self {
        Self {
            id: Default::default(),
            user_id,
            medicine,
            taken_at,
        }
    }
}

impl Entity for MedicationHistoryEntry {
    fn id(&self) -> &ID {
        &self.id
    }
}
