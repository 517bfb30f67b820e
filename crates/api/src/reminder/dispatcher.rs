use glucomate_domain::{DeliveryLedger, PhoneNumber, Reminder, SlotStamp};
use glucomate_infra::ISmsGateway;
use std::sync::{Arc, Mutex};

/// What happened to one firing reminder.
#[derive(Debug)]
pub enum DispatchOutcome {
    Delivered,
    Failed(String),
    /// The reminder was already dispatched within this calendar minute
    AlreadyDelivered,
}

/// Sends one SMS per firing reminder, at most once per reminder per
/// calendar minute. The delivery job owns exactly one dispatcher for the
/// lifetime of the process; the ledger it wraps is what deduplicates
/// ticks that land inside the same minute.
pub struct ReminderDispatcher {
    sms: Arc<dyn ISmsGateway>,
    ledger: Mutex<DeliveryLedger>,
}

impl ReminderDispatcher {
    pub fn new(sms: Arc<dyn ISmsGateway>) -> Self {
        Self {
            sms,
            ledger: Mutex::new(DeliveryLedger::new()),
        }
    }

    pub async fn dispatch(
        &self,
        reminder: &Reminder,
        to: &PhoneNumber,
        stamp: SlotStamp,
    ) -> DispatchOutcome {
        // The slot is consumed before the send attempt: a transport
        // failure still counts as this minute's one attempt.
        {
            let mut ledger = self.ledger.lock().unwrap();
            if !ledger.record(&reminder.id, stamp) {
                return DispatchOutcome::AlreadyDelivered;
            }
        }

        let body = format!("Time to take {}", reminder.medicine);
        match self.sms.send(to, &body).await {
            Ok(()) => DispatchOutcome::Delivered,
            Err(e) => DispatchOutcome::Failed(e.to_string()),
        }
    }
}
