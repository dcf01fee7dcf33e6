//! Seed reminders the portal boots with

use chrono::DateTime;
use chrono::Utc;

use crate::error::Error;
use crate::error::Result;
use crate::reminders::ReminderDraft;
use crate::reminders::ReminderKind;

use super::ReminderStore;

/// Title, description, date, time, kind, audience
type SeedRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    ReminderKind,
    &'static str,
);

const SEED: [SeedRow; 5] = [
    (
        "Google Application Deadline",
        "Remember to complete your application for Google.",
        "2025-05-20",
        "23:59",
        ReminderKind::Deadline,
        "all",
    ),
    (
        "Amazon Application Deadline",
        "Remember to complete your application for Amazon.",
        "2025-05-15",
        "23:59",
        ReminderKind::Deadline,
        "cse-students",
    ),
    (
        "Microsoft Application Deadline",
        "Remember to complete your application for Microsoft.",
        "2025-05-18",
        "23:59",
        ReminderKind::Deadline,
        "all",
    ),
    (
        "Career Fair",
        "Attend the annual career fair.",
        "2025-05-10",
        "10:00",
        ReminderKind::Event,
        "all",
    ),
    (
        "Resume Workshop",
        "Attend the resume workshop.",
        "2025-05-05",
        "14:00",
        ReminderKind::Event,
        "all",
    ),
];

/// The workshop already took place, it was sent and completed
const WORKSHOP_SENT_AT: &str = "2025-04-30T09:00:00Z";

impl ReminderStore {
    /// Create a store filled with the seed reminders
    pub fn seeded() -> Result<Self> {
        let mut store = Self::new();

        let mut last = None;
        for (title, description, date, time, kind, audience) in SEED {
            let draft = ReminderDraft {
                title: title.to_string(),
                description: description.to_string(),
                date: date.to_string(),
                time: time.to_string(),
                kind,
                audience: audience.to_string(),
            };

            last = Some(store.add(&draft)?.id);
        }

        let sent_at = DateTime::parse_from_rfc3339(WORKSHOP_SENT_AT)
            .map_err(Error::validation)?
            .with_timezone(&Utc);

        if let Some(workshop) = last {
            store.update(workshop, |reminder| {
                reminder.completed = true;
                reminder.delivery.mark_sent(sent_at);
            })?;
        }

        Ok(store)
    }
}
