use crate::shared::entity::{Entity, ID};
use chrono::{prelude::*, Weekday};
use chrono_tz::Tz;
use std::{fmt::Display, str::FromStr};

/// A `Reminder` describes when and how often its owner should be notified
/// to take a medication. It is evaluated once per minute by the delivery
/// job against the owner's local wall-clock time.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The `User` that created this `Reminder` and will receive
    /// the SMS notification when it fires
    pub user_id: ID,
    /// Name of the medication, letters/digits/hyphen/space only
    pub medicine: String,
    /// Wall-clock time at which the reminder fires, one of the 96
    /// fifteen-minute slots of a day
    pub time_of_day: SlotTime,
    pub recurrence: Recurrence,
    /// Insertion timestamp in millis
    pub created_at: i64,
}

impl Reminder {
    pub fn new(
        user_id: ID,
        medicine: String,
        time_of_day: SlotTime,
        recurrence: Recurrence,
        created_at: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            user_id,
            medicine,
            time_of_day,
            recurrence,
            created_at,
        }
    }

    /// Decides whether this reminder fires at the given instant. The match
    /// is minute-exact; seconds are ignored. `Once` carries no date, so it
    /// matches every day at its minute until the reminder is deleted.
    pub fn evaluate(&self, now: &DateTime<Tz>) -> Firing {
        if now.hour() != self.time_of_day.hours || now.minute() != self.time_of_day.minutes {
            return Firing::Skipped;
        }
        match &self.recurrence {
            Recurrence::Daily | Recurrence::Once => Firing::Fires,
            Recurrence::Weekdays(days) => {
                if days.contains(&now.weekday()) {
                    Firing::Fires
                } else {
                    Firing::Skipped
                }
            }
        }
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Outcome of evaluating a `Reminder` against an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Firing {
    Fires,
    Skipped,
}

/// A wall-clock time with minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotTime {
    pub hours: u32,
    pub minutes: u32,
}

impl SlotTime {
    pub fn new(hours: u32, minutes: u32) -> Option<Self> {
        if hours > 23 || minutes > 59 {
            return None;
        }
        Some(Self { hours, minutes })
    }

    /// Whether this time falls on one of the 96 fifteen-minute slots of a
    /// day. Reminders are only ever created on slot boundaries.
    pub fn is_quarter_aligned(&self) -> bool {
        self.minutes % 15 == 0
    }
}

impl Display for SlotTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

impl FromStr for SlotTime {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let hours = parts
            .next()
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or(())?;
        let minutes = parts
            .next()
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or(())?;
        if parts.next().is_some() {
            return Err(());
        }
        SlotTime::new(hours, minutes).ok_or(())
    }
}

/// How often a `Reminder` repeats. Stored on the wire as the label
/// `"Daily"`, `"Once"` or a comma-joined list of weekday names.
#[derive(Debug, Clone, PartialEq)]
pub enum Recurrence {
    Daily,
    Once,
    Weekdays(Vec<Weekday>),
}

impl Recurrence {
    pub fn label(&self) -> String {
        match self {
            Recurrence::Daily => "Daily".to_string(),
            Recurrence::Once => "Once".to_string(),
            Recurrence::Weekdays(days) => days
                .iter()
                .map(|d| weekday_name(*d))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Inverse of [`Recurrence::label`]. Returns `None` for labels that
    /// contain no valid weekday, so a corrupt stored document is dropped
    /// instead of firing on the wrong days.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Daily" => Some(Recurrence::Daily),
            "Once" => Some(Recurrence::Once),
            other => {
                let days = other
                    .split(',')
                    .map(|d| d.trim().parse::<Weekday>())
                    .collect::<Result<Vec<_>, _>>()
                    .ok()?;
                if days.is_empty() {
                    None
                } else {
                    Some(Recurrence::Weekdays(days))
                }
            }
        }
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Medication names accept letters, digits, hyphens and spaces and must not
/// be blank.
pub fn is_valid_medicine_name(name: &str) -> bool {
    !name.trim().is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == ' ')
}

#[cfg(test)]
mod test {
    use super::*;

    fn metformin_daily() -> Reminder {
        Reminder::new(
            Default::default(),
            "Metformin".into(),
            "09:00".parse().unwrap(),
            Recurrence::Daily,
            0,
        )
    }

    fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Tz> {
        chrono_tz::UTC.ymd(year, month, day).and_hms(hour, min, sec)
    }

    #[test]
    fn daily_fires_on_exact_minute_regardless_of_date() {
        let reminder = metformin_daily();
        assert_eq!(reminder.evaluate(&at(2024, 1, 15, 9, 0, 0)), Firing::Fires);
        assert_eq!(reminder.evaluate(&at(2024, 3, 2, 9, 0, 0)), Firing::Fires);
        // Seconds within the minute do not matter
        assert_eq!(reminder.evaluate(&at(2024, 1, 15, 9, 0, 45)), Firing::Fires);
    }

    #[test]
    fn daily_skips_on_minute_mismatch() {
        let reminder = metformin_daily();
        assert_eq!(
            reminder.evaluate(&at(2024, 1, 15, 9, 1, 0)),
            Firing::Skipped
        );
        assert_eq!(
            reminder.evaluate(&at(2024, 1, 15, 8, 59, 0)),
            Firing::Skipped
        );
        assert_eq!(
            reminder.evaluate(&at(2024, 1, 15, 21, 0, 0)),
            Firing::Skipped
        );
    }

    #[test]
    fn weekday_set_fires_only_on_listed_days() {
        let mut reminder = metformin_daily();
        reminder.recurrence =
            Recurrence::Weekdays(vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]);

        // 2024-01-16 is a Tuesday
        assert_eq!(
            reminder.evaluate(&at(2024, 1, 16, 9, 0, 0)),
            Firing::Skipped
        );
        // 2024-01-17 is a Wednesday
        assert_eq!(reminder.evaluate(&at(2024, 1, 17, 9, 0, 0)), Firing::Fires);
        // Right day, wrong minute
        assert_eq!(
            reminder.evaluate(&at(2024, 1, 17, 9, 15, 0)),
            Firing::Skipped
        );
    }

    #[test]
    fn once_refires_every_day() {
        // `Once` stores no date, so it keeps matching its minute on every
        // day until the reminder is deleted.
        let mut reminder = metformin_daily();
        reminder.recurrence = Recurrence::Once;
        assert_eq!(reminder.evaluate(&at(2024, 1, 15, 9, 0, 0)), Firing::Fires);
        assert_eq!(reminder.evaluate(&at(2024, 1, 16, 9, 0, 0)), Firing::Fires);
    }

    #[test]
    fn slot_time_parsing() {
        let time: SlotTime = "09:00".parse().unwrap();
        assert_eq!(
            time,
            SlotTime {
                hours: 9,
                minutes: 0
            }
        );
        assert_eq!(time.to_string(), "09:00");
        assert!("24:00".parse::<SlotTime>().is_err());
        assert!("09:60".parse::<SlotTime>().is_err());
        assert!("ab:cd".parse::<SlotTime>().is_err());
        assert!("09".parse::<SlotTime>().is_err());
        assert!("09:00:00".parse::<SlotTime>().is_err());
    }

    #[test]
    fn slot_time_quarter_alignment() {
        for hours in 0..24 {
            for minutes in &[0, 15, 30, 45] {
                let time = SlotTime::new(hours, *minutes).unwrap();
                assert!(time.is_quarter_aligned());
            }
        }
        assert!(!SlotTime::new(9, 20).unwrap().is_quarter_aligned());
        assert!(!SlotTime::new(9, 1).unwrap().is_quarter_aligned());
    }

    #[test]
    fn recurrence_labels_round_trip() {
        assert_eq!(Recurrence::from_label("Daily"), Some(Recurrence::Daily));
        assert_eq!(Recurrence::from_label("Once"), Some(Recurrence::Once));
        assert_eq!(
            Recurrence::from_label("Monday, Wednesday, Friday"),
            Some(Recurrence::Weekdays(vec![
                Weekday::Mon,
                Weekday::Wed,
                Weekday::Fri
            ]))
        );
        assert_eq!(
            Recurrence::Weekdays(vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]).label(),
            "Monday, Wednesday, Friday"
        );
        assert_eq!(Recurrence::Daily.label(), "Daily");
    }

    #[test]
    fn recurrence_rejects_malformed_labels() {
        assert_eq!(Recurrence::from_label(""), None);
        assert_eq!(Recurrence::from_label("   "), None);
        assert_eq!(Recurrence::from_label("Monday, Blursday"), None);
        assert_eq!(Recurrence::from_label("Weekly"), None);
    }

    #[test]
    fn medicine_name_rules() {
        assert!(is_valid_medicine_name("Metformin"));
        assert!(is_valid_medicine_name("Metformin 500mg"));
        assert!(is_valid_medicine_name("Co-codamol"));
        assert!(!is_valid_medicine_name(""));
        assert!(!is_valid_medicine_name("   "));
        assert!(!is_valid_medicine_name("Met@formin"));
        assert!(!is_valid_medicine_name("insulin!"));
    }
}
