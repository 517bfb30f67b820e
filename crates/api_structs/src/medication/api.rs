use crate::medication::dtos::MedicationHistoryEntryDTO;
use glucomate_domain::MedicationHistoryEntry;
use serde::{Deserialize, Serialize};

pub mod log_medication_taken {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub medicine: String,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub entry: MedicationHistoryEntryDTO,
    }

    impl APIResponse {
        pub fn new(entry: MedicationHistoryEntry) -> Self {
            Self {
                entry: MedicationHistoryEntryDTO::new(entry),
            }
        }
    }
}

pub mod get_medication_history {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub history: Vec<MedicationHistoryEntryDTO>,
    }

    impl APIResponse {
        pub fn new(history: Vec<MedicationHistoryEntry>) -> Self {
            Self {
                history: history
                    .into_iter()
                    .map(MedicationHistoryEntryDTO::new)
                    .collect(),
            }
        }
    }
}
