//! Reminders

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::error::Error;
use crate::error::Result;

/// Format of the reminder date
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format of the reminder time of day, 24h
pub const TIME_FORMAT: &str = "%H:%M";

/// Identifier of a reminder, assigned by the store
pub type ReminderId = u64;

/// What a reminder is about
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ReminderKind {
    /// Something has to be handed in before the date
    Deadline,

    /// Something happens on the date
    #[default]
    Event,
}

/// Delivery state of a reminder towards its audience
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Delivery {
    /// Not yet delivered
    #[default]
    Unsent,

    /// Delivered at the given instant
    Sent(DateTime<Utc>),
}

impl Delivery {
    /// Instant of delivery, if delivered
    pub fn sent_at(self) -> Option<DateTime<Utc>> {
        match self {
            Delivery::Unsent => None,
            Delivery::Sent(at) => Some(at),
        }
    }

    pub fn is_sent(self) -> bool {
        matches!(self, Delivery::Sent(_))
    }

    /// Mark as delivered at `at`
    ///
    /// One-way: an already delivered state keeps its original instant. Returns `true` when this
    /// call did the delivery
    pub fn mark_sent(&mut self, at: DateTime<Utc>) -> bool {
        match self {
            Delivery::Sent(_) => false,
            Delivery::Unsent => {
                *self = Delivery::Sent(at);
                true
            }
        }
    }
}

/// A dated deadline or event addressed to a student group
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reminder {
    /// Reminder ID, unique for the lifetime of the store
    pub id: ReminderId,

    /// Display title, never empty
    pub title: String,

    /// Free text, may be empty
    pub description: String,

    /// Day the reminder concerns
    pub date: NaiveDate,

    /// Time of day, for display and same-day ordering
    pub time: NaiveTime,

    /// Deadline or event
    pub kind: ReminderKind,

    /// ID of the targeted student group
    pub audience: String,

    /// Marked as done by a student
    pub completed: bool,

    /// Delivered to the audience by an admin
    pub delivery: Delivery,
}

impl Reminder {
    /// The instant used for chronological ordering
    pub fn scheduled_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Neither completed nor delivered yet
    pub fn is_upcoming(&self) -> bool {
        !self.completed && !self.delivery.is_sent()
    }

    /// An unresolved deadline, raises the severity of its day
    pub fn is_open_deadline(&self) -> bool {
        self.kind == ReminderKind::Deadline && !self.completed
    }

    /// Completed or delivered, shown muted in lists
    pub fn is_settled(&self) -> bool {
        self.completed || self.delivery.is_sent()
    }
}

/// Values to create a reminder
///
/// Raw user input, validated when added to the store
#[derive(Clone, Debug)]
pub struct ReminderDraft {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub kind: ReminderKind,
    pub audience: String,
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map_err(|_| Error::validation(format!(r#"Invalid date "{date}", expected YYYY-MM-DD"#)))
}

/// Parse a `HH:MM` time of day
pub fn parse_time(time: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(time.trim(), TIME_FORMAT)
        .map_err(|_| Error::validation(format!(r#"Invalid time "{time}", expected HH:MM"#)))
}
