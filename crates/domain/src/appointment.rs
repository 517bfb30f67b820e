use crate::shared::entity::{Entity, ID};

/// A doctor's appointment logged by the user. Listed chronologically on
/// the schedule page; the delivery job never reads these.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: ID,
    pub user_id: ID,
    pub doctor: String,
    /// Start of the appointment in millis since epoch
    pub starts_at: i64,
    pub notes: String,
}

impl Appointment {
    pub fn new(user_id: ID, doctor: String, starts_at: i64, notes: String) -> Self {
        Self {
            id: Default::default(),
            user_id,
            doctor,
            starts_at,
            notes,
        }
    }
}

impl Entity for Appointment {
    fn id(&self) -> &ID {
        &self.id
    }
}
