//! Scheduling index
//!
//! Groups the reminders of a store by day, derived on demand and never cached

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::reminders::Reminder;
use crate::reminders::ReminderKind;
use crate::storage::ReminderStore;

/// Severity of a calendar day
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    /// At least one deadline of the day is not completed
    Critical,

    /// The day has reminders, none of them an open deadline
    Normal,
}

/// Badge shown on a calendar day
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct DayBadge {
    /// Number of reminders on the day
    pub count: usize,

    /// How urgent the day is
    pub severity: Severity,
}

/// Styling of a calendar day
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DayTone {
    /// An open deadline
    Deadline,

    /// No open deadline, but an open event
    Event,

    /// Everything on the day is completed
    Settled,
}

/// Reminders by day
///
/// Days keep the insertion order of the store
#[derive(Debug)]
pub struct ScheduleIndex<'a> {
    days: BTreeMap<NaiveDate, Vec<&'a Reminder>>,
}

impl<'a> ScheduleIndex<'a> {
    /// Build the index from the current state of the store
    pub fn build(store: &'a ReminderStore) -> Self {
        let mut days: BTreeMap<NaiveDate, Vec<&'a Reminder>> = BTreeMap::new();

        for reminder in store.list() {
            days.entry(reminder.date).or_default().push(reminder);
        }

        Self { days }
    }

    /// All reminders on a date, in insertion order
    pub fn by_date(&self, date: NaiveDate) -> &[&'a Reminder] {
        self.days
            .get(&date)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Badge for a date, `None` when the day has no reminders
    pub fn day_badge(&self, date: NaiveDate) -> Option<DayBadge> {
        let reminders = self.by_date(date);
        if reminders.is_empty() {
            return None;
        }

        let severity = if reminders.iter().any(|reminder| reminder.is_open_deadline()) {
            Severity::Critical
        } else {
            Severity::Normal
        };

        Some(DayBadge {
            count: reminders.len(),
            severity,
        })
    }

    /// Styling for a date, `None` when the day has no reminders
    pub fn day_tone(&self, date: NaiveDate) -> Option<DayTone> {
        let reminders = self.by_date(date);
        if reminders.is_empty() {
            return None;
        }

        let open_of = |kind: ReminderKind| {
            reminders
                .iter()
                .any(|reminder| reminder.kind == kind && !reminder.completed)
        };

        Some(if open_of(ReminderKind::Deadline) {
            DayTone::Deadline
        } else if open_of(ReminderKind::Event) {
            DayTone::Event
        } else {
            DayTone::Settled
        })
    }

    /// Days with reminders between `from` and `to` (both inclusive), ascending
    pub fn days_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
        if from > to {
            return Vec::new();
        }

        self.days.range(from..=to).map(|(date, _)| *date).collect()
    }
}
