//! All things related to the storage of reminders
//!
//! Memory only, will be destroyed on system shutdown

use crate::error::Error;
use crate::error::Result;
use crate::reminders::Delivery;
use crate::reminders::Reminder;
use crate::reminders::ReminderDraft;
use crate::reminders::ReminderId;
use crate::reminders::parse_date;
use crate::reminders::parse_time;

mod seed;

/// The authoritative collection of reminders
///
/// Keeps insertion order, display ordering is up to the views
#[derive(Clone, Debug, Default)]
pub struct ReminderStore {
    /// All reminders, in insertion order
    reminders: Vec<Reminder>,
}

impl ReminderStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reminders in the store
    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    /// Validate and add a reminder
    ///
    /// The new reminder gets the next ID (highest ID + 1), is not completed and not sent
    pub fn add(&mut self, draft: &ReminderDraft) -> Result<Reminder> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(Error::validation("Title is required"));
        }

        let date = parse_date(&draft.date)?;
        let time = parse_time(&draft.time)?;

        let reminder = Reminder {
            id: self.next_id(),
            title: title.to_string(),
            description: draft.description.clone(),
            date,
            time,
            kind: draft.kind,
            audience: draft.audience.clone(),
            completed: false,
            delivery: Delivery::Unsent,
        };

        self.reminders.push(reminder.clone());

        Ok(reminder)
    }

    /// Find a single reminder by its ID
    pub fn get(&self, id: ReminderId) -> Result<&Reminder> {
        self.reminders
            .iter()
            .find(|reminder| reminder.id == id)
            .ok_or(Error::NotFound(id))
    }

    /// All reminders, in insertion order
    pub fn list(&self) -> &[Reminder] {
        &self.reminders
    }

    /// Mutate a single reminder in place
    ///
    /// The ID is owned by the store, changes to it by the mutator are discarded. Once sent, the
    /// delivery is kept as well: it is never cleared or stamped again
    pub fn update<F>(&mut self, id: ReminderId, mutator: F) -> Result<&Reminder>
    where
        F: FnOnce(&mut Reminder),
    {
        let reminder = self
            .reminders
            .iter_mut()
            .find(|reminder| reminder.id == id)
            .ok_or(Error::NotFound(id))?;

        let delivered = reminder.delivery;

        mutator(reminder);
        reminder.id = id;

        if delivered.is_sent() {
            reminder.delivery = delivered;
        }

        Ok(reminder)
    }

    fn next_id(&self) -> ReminderId {
        self.reminders
            .iter()
            .map(|reminder| reminder.id)
            .max()
            .map_or(1, |id| id + 1)
    }
}
