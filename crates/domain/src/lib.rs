mod appointment;
mod assistant;
mod delivery;
mod medication;
mod reminder;
mod shared;
mod user;

pub use appointment::Appointment;
pub use assistant::quick_reply;
pub use delivery::{DeliveryLedger, SlotStamp};
pub use medication::MedicationHistoryEntry;
pub use reminder::{is_valid_medicine_name, Firing, Recurrence, Reminder, SlotTime};
pub use shared::entity::{Entity, ID};
pub use user::{InvalidPhoneNumber, PhoneNumber, User};
