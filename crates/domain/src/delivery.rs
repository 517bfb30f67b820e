use crate::shared::entity::ID;
use chrono::prelude::*;
use chrono_tz::Tz;
use std::collections::HashSet;

/// Identifies one calendar minute on one calendar day. Two instants within
/// the same minute map to the same stamp, even across scheduler ticks that
/// straddle a second boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotStamp {
    /// Day number (days since the common era) of the instant
    pub date: i32,
    /// Minute of that day, 0..=1439
    pub minute: u32,
}

impl SlotStamp {
    pub fn from_datetime(now: &DateTime<Tz>) -> Self {
        Self {
            date: now.num_days_from_ce(),
            minute: now.hour() * 60 + now.minute(),
        }
    }
}

/// Records which reminders have already been dispatched during the current
/// calendar minute, guaranteeing at-most-one outbound notification per
/// reminder per matching minute. Entries for a minute are dropped as soon
/// as a later minute is recorded, so the set never grows beyond one tick's
/// worth of reminders.
#[derive(Debug, Default)]
pub struct DeliveryLedger {
    current: Option<SlotStamp>,
    dispatched: HashSet<ID>,
}

impl DeliveryLedger {
    pub fn new() -> Self {
        Default::default()
    }

    /// Marks the reminder as dispatched for the given minute. Returns
    /// `false` when it was already recorded within that minute, in which
    /// case the caller must not dispatch again.
    pub fn record(&mut self, reminder_id: &ID, stamp: SlotStamp) -> bool {
        if self.current != Some(stamp) {
            self.current = Some(stamp);
            self.dispatched.clear();
        }
        self.dispatched.insert(reminder_id.clone())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn stamp(date: i32, minute: u32) -> SlotStamp {
        SlotStamp { date, minute }
    }

    #[test]
    fn refuses_second_record_within_same_minute() {
        let mut ledger = DeliveryLedger::new();
        let id = ID::new();
        assert!(ledger.record(&id, stamp(100, 540)));
        assert!(!ledger.record(&id, stamp(100, 540)));
    }

    #[test]
    fn different_reminders_share_a_minute() {
        let mut ledger = DeliveryLedger::new();
        assert!(ledger.record(&ID::new(), stamp(100, 540)));
        assert!(ledger.record(&ID::new(), stamp(100, 540)));
    }

    #[test]
    fn minute_rollover_clears_previous_entries() {
        let mut ledger = DeliveryLedger::new();
        let id = ID::new();
        assert!(ledger.record(&id, stamp(100, 540)));
        assert!(ledger.record(&id, stamp(100, 541)));
        // Back within the new minute it is again a duplicate
        assert!(!ledger.record(&id, stamp(100, 541)));
    }

    #[test]
    fn same_minute_on_next_day_is_a_fresh_slot() {
        let mut ledger = DeliveryLedger::new();
        let id = ID::new();
        assert!(ledger.record(&id, stamp(100, 540)));
        assert!(ledger.record(&id, stamp(101, 540)));
    }

    #[test]
    fn stamps_ignore_seconds() {
        let t1 = chrono_tz::UTC.ymd(2024, 1, 15).and_hms(9, 0, 10);
        let t2 = chrono_tz::UTC.ymd(2024, 1, 15).and_hms(9, 0, 45);
        assert_eq!(
            SlotStamp::from_datetime(&t1),
            SlotStamp::from_datetime(&t2)
        );
        let t3 = chrono_tz::UTC.ymd(2024, 1, 15).and_hms(9, 1, 0);
        assert_ne!(
            SlotStamp::from_datetime(&t1),
            SlotStamp::from_datetime(&t3)
        );
    }
}
