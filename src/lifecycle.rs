//! Reminder lifecycle
//!
//! Every state transition of a reminder goes through [`Reminders`](Reminders): creating,
//! sending to the audience and toggling completion

use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;

use crate::audiences::AudienceRegistry;
use crate::error::Error;
use crate::error::Result;
use crate::reminders::Reminder;
use crate::reminders::ReminderDraft;
use crate::reminders::ReminderId;
use crate::storage::ReminderStore;

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Possible lifecycle events
#[derive(Debug)]
pub enum ReminderEvent<'a> {
    /// Reminder is created
    Created(&'a Reminder),

    /// Reminder is sent to its audience for the first time
    Sent(&'a Reminder),

    /// Reminder is marked as complete or incomplete
    CompletionToggled(&'a Reminder),
}

impl ReminderEvent<'_> {
    /// Short message for the user that triggered the event
    pub fn message(&self) -> &'static str {
        match self {
            ReminderEvent::Created(_) => "New reminder created",
            ReminderEvent::Sent(_) => "Reminder sent to students",
            ReminderEvent::CompletionToggled(_) => "Reminder status updated",
        }
    }

    pub fn reminder(&self) -> &Reminder {
        match self {
            ReminderEvent::Created(reminder)
            | ReminderEvent::Sent(reminder)
            | ReminderEvent::CompletionToggled(reminder) => reminder,
        }
    }
}

/// Receiver of lifecycle events
pub trait Notifier: Send + Sync {
    fn notify(&self, event: &ReminderEvent<'_>);
}

/// Notifier writing every event to the trace log
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, event: &ReminderEvent<'_>) {
        let reminder = event.reminder();

        tracing::info!(
            reminder_id = reminder.id,
            audience = %reminder.audience,
            "{}",
            event.message()
        );
    }
}

/// Result of sending a reminder
#[derive(Clone, Debug)]
pub struct SendOutcome {
    /// The reminder after sending
    pub reminder: Reminder,

    /// `false` when the reminder was sent before
    pub newly_sent: bool,
}

/// Reminder lifecycle controller
///
/// Owns the store, the only way to mutate reminders
pub struct Reminders {
    /// The reminders
    store: ReminderStore,

    /// Known audiences, to validate new reminders against
    audiences: AudienceRegistry,

    /// Clock for the delivery instant
    clock: Arc<dyn Clock>,

    /// Receiver of the lifecycle events
    notifier: Arc<dyn Notifier>,
}

impl Reminders {
    pub fn new(
        store: ReminderStore,
        audiences: AudienceRegistry,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            audiences,
            clock,
            notifier,
        }
    }

    pub fn store(&self) -> &ReminderStore {
        &self.store
    }

    pub fn audiences(&self) -> &AudienceRegistry {
        &self.audiences
    }

    /// Create a new reminder
    ///
    /// The audience has to be known, the rest is validated by the store
    pub fn create(&mut self, draft: &ReminderDraft) -> Result<Reminder> {
        if !self.audiences.contains(&draft.audience) {
            return Err(Error::validation(format!(
                r#"Unknown audience "{}""#,
                draft.audience
            )));
        }

        let reminder = self.store.add(draft)?;

        self.notifier.notify(&ReminderEvent::Created(&reminder));

        Ok(reminder)
    }

    /// Send a reminder to its audience
    ///
    /// Sending twice is allowed, the reminder keeps the instant of the first send
    pub fn send(&mut self, id: ReminderId) -> Result<SendOutcome> {
        let now = self.clock.now();

        let mut newly_sent = false;
        let reminder = self
            .store
            .update(id, |reminder| newly_sent = reminder.delivery.mark_sent(now))?
            .clone();

        if newly_sent {
            self.notifier.notify(&ReminderEvent::Sent(&reminder));
        } else {
            tracing::debug!("Reminder {id} was already sent");
        }

        Ok(SendOutcome {
            reminder,
            newly_sent,
        })
    }

    /// Flip the completion of a reminder
    pub fn toggle_complete(&mut self, id: ReminderId) -> Result<Reminder> {
        let reminder = self
            .store
            .update(id, |reminder| reminder.completed = !reminder.completed)?
            .clone();

        self.notifier
            .notify(&ReminderEvent::CompletionToggled(&reminder));

        Ok(reminder)
    }
}

/// Clock that only moves when told to
#[cfg(test)]
#[derive(Debug)]
pub struct ManualClock {
    now: std::sync::Mutex<DateTime<Utc>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: std::sync::Mutex::new(now),
        }
    }

    pub fn advance(&self, duration: chrono::Duration) {
        *self.now.lock().unwrap() += duration;
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
