use glucomate_domain::{Reminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub medicine: String,
    /// Wall-clock time as "HH:MM"
    pub time: String,
    /// "Daily", "Once" or a comma-joined weekday list
    pub frequency: String,
    pub created_at: i64,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id.clone(),
            medicine: reminder.medicine,
            time: reminder.time_of_day.to_string(),
            frequency: reminder.recurrence.label(),
            created_at: reminder.created_at,
        }
    }
}

/// Recurrence as supplied by clients when creating a reminder.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum RecurrenceDTO {
    Daily,
    Once,
    Weekdays(Vec<String>),
}
